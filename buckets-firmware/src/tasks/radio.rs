//! Radio bridge task
//!
//! The bridge is a small radio module on UART1 that relays peer
//! broadcasts. This task tunes its channel once, then parses incoming
//! frames and queues received payloads for the engine.

use defmt::*;
use embassy_rp::uart::{BufferedUartRx, BufferedUartTx};
use embedded_io_async::{Read, Write};

use buckets_protocol::{BridgeCommand, BridgeEvent, FrameParser};

use crate::channels::PEER_INBOX;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

#[embassy_executor::task]
pub async fn radio_task(mut tx: BufferedUartTx, mut rx: BufferedUartRx, channel: u8) {
    info!("Radio task started on channel {}", channel);

    let frame = BridgeCommand::SetChannel(channel).to_frame().encode();
    if let Err(e) = tx.write_all(&frame).await {
        warn!("Failed to set radio channel: {:?}", e);
    }

    let mut parser = FrameParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        let n = match rx.read(&mut buf).await {
            Ok(n) => n,
            Err(e) => {
                warn!("UART read error: {:?}", e);
                continue;
            }
        };

        for &byte in &buf[..n] {
            let frame = match parser.feed(byte) {
                Ok(Some(frame)) => frame,
                Ok(None) => continue,
                Err(e) => {
                    debug!("Bridge frame dropped: {}", e);
                    continue;
                }
            };
            match BridgeEvent::from_frame(&frame) {
                Ok(BridgeEvent::Received(payload)) => {
                    if PEER_INBOX.try_send(payload).is_err() {
                        warn!("Peer inbox full, payload dropped");
                    }
                }
                Ok(BridgeEvent::Ready) => info!("Radio bridge ready"),
                Err(e) => debug!("Unknown bridge frame: {}", e),
            }
        }
    }
}
