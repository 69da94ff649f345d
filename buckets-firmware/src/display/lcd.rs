//! HD44780 character LCD behind a PCF8574 I2C backpack
//!
//! The backpack maps its eight outputs as:
//!
//! ```text
//! P7..P4  D7..D4 (4-bit bus)
//! P3      backlight
//! P2      E
//! P1      RW (held low)
//! P0      RS
//! ```

use embassy_time::Timer;
use embedded_hal_async::i2c::I2c;

use buckets_display::DisplayError;

const RS: u8 = 0x01;
const EN: u8 = 0x04;
const BACKLIGHT: u8 = 0x08;

const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_INCREMENT: u8 = 0x06;
const CMD_DISPLAY_ON: u8 = 0x0C;
const CMD_FUNCTION_4BIT_2LINE: u8 = 0x28;
const CMD_SET_DDRAM: u8 = 0x80;

/// DDRAM address of each row's first cell
const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

/// A probed and initialised LCD
pub struct Lcd<I> {
    i2c: I,
    address: u8,
}

impl<I: I2c> Lcd<I> {
    /// Take the first address that acknowledges and initialise the panel
    pub async fn probe(mut i2c: I, addresses: &[u8]) -> Result<Self, DisplayError> {
        let mut found = None;
        for &address in addresses {
            if i2c.write(address, &[BACKLIGHT]).await.is_ok() {
                found = Some(address);
                break;
            }
        }
        let address = found.ok_or(DisplayError::NotInitialized)?;

        let mut lcd = Self { i2c, address };
        lcd.init().await?;
        Ok(lcd)
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Redraw every cell
    pub async fn draw<const COLS: usize, const ROWS: usize>(
        &mut self,
        cells: &[[u8; COLS]; ROWS],
    ) -> Result<(), DisplayError> {
        for (row, line) in cells.iter().enumerate() {
            let offset = ROW_OFFSETS.get(row).copied().unwrap_or(0);
            self.command(CMD_SET_DDRAM | offset).await?;
            for &byte in line {
                self.send(byte, RS).await?;
            }
        }
        Ok(())
    }

    async fn init(&mut self) -> Result<(), DisplayError> {
        // Power-on wait, then the datasheet's reset-by-instruction sequence
        Timer::after_millis(50).await;
        self.write_nibble(0x03 << 4, 0).await?;
        Timer::after_millis(5).await;
        self.write_nibble(0x03 << 4, 0).await?;
        Timer::after_millis(1).await;
        self.write_nibble(0x03 << 4, 0).await?;
        self.write_nibble(0x02 << 4, 0).await?;

        self.command(CMD_FUNCTION_4BIT_2LINE).await?;
        self.command(CMD_DISPLAY_ON).await?;
        self.command(CMD_CLEAR).await?;
        Timer::after_millis(2).await;
        self.command(CMD_ENTRY_INCREMENT).await
    }

    async fn command(&mut self, cmd: u8) -> Result<(), DisplayError> {
        self.send(cmd, 0).await
    }

    async fn send(&mut self, byte: u8, mode: u8) -> Result<(), DisplayError> {
        self.write_nibble(byte & 0xF0, mode).await?;
        self.write_nibble(byte << 4, mode).await
    }

    /// Clock one high nibble onto the bus
    async fn write_nibble(&mut self, nibble: u8, mode: u8) -> Result<(), DisplayError> {
        let bits = nibble | mode | BACKLIGHT;
        self.i2c
            .write(self.address, &[bits | EN, bits])
            .await
            .map_err(|_| DisplayError::Communication)
    }
}
