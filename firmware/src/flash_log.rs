//! Flight log in on-board flash.

use defmt::{error, info};
use embassy_rp::flash::{Blocking, Flash, ERASE_SIZE};
use embassy_rp::peripherals::FLASH;
use embassy_rp::uart::{Async, UartTx};
use flight_core::{FlightLog, LogError};
use flight_proto::{TelemetryRecord, RECORD_LEN};

/// Total flash on the board.
pub const FLASH_SIZE: usize = 2 * 1024 * 1024;

/// Log region size. Kept out of the program region by `memory.x`.
pub const LOG_SIZE: u32 = 64 * 1024;

/// Offset of the log region from the start of flash.
pub const LOG_OFFSET: u32 = FLASH_SIZE as u32 - LOG_SIZE;

const _: () = assert!(LOG_OFFSET % ERASE_SIZE as u32 == 0);

/// Append-only record log. A dump streams the encoded records out of the
/// operator link.
pub struct FlashLog<'d> {
    flash: Flash<'d, FLASH, Blocking, FLASH_SIZE>,
    tx: UartTx<'d, Async>,
    /// Bytes written since the last erase.
    cursor: u32,
}

impl<'d> FlashLog<'d> {
    pub fn new(flash: Flash<'d, FLASH, Blocking, FLASH_SIZE>, tx: UartTx<'d, Async>) -> Self {
        Self {
            flash,
            tx,
            cursor: 0,
        }
    }

    /// Number of records written since the last erase.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cursor as usize / RECORD_LEN
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }
}

impl FlightLog for FlashLog<'_> {
    fn append(&mut self, record: &TelemetryRecord) -> Result<(), LogError> {
        let next = self.cursor + RECORD_LEN as u32;
        if next > LOG_SIZE {
            return Err(LogError::Full);
        }
        self.flash
            .blocking_write(LOG_OFFSET + self.cursor, &record.encode())
            .map_err(|e| {
                error!("flash write failed: {:?}", e);
                LogError::Io
            })?;
        self.cursor = next;
        Ok(())
    }

    fn erase(&mut self) -> Result<(), LogError> {
        self.flash
            .blocking_erase(LOG_OFFSET, LOG_OFFSET + LOG_SIZE)
            .map_err(|e| {
                error!("flash erase failed: {:?}", e);
                LogError::Io
            })?;
        self.cursor = 0;
        Ok(())
    }

    fn dump(&mut self) -> Result<usize, LogError> {
        let mut buf = [0u8; RECORD_LEN];
        let mut count = 0;
        let mut offset = 0;
        while offset < self.cursor {
            self.flash
                .blocking_read(LOG_OFFSET + offset, &mut buf)
                .map_err(|_| LogError::Io)?;
            TelemetryRecord::decode(&buf).map_err(|_| LogError::Corrupt)?;
            self.tx.blocking_write(&buf).map_err(|_| LogError::Io)?;
            offset += RECORD_LEN as u32;
            count += 1;
        }
        info!("dumped {} records", count);
        Ok(count)
    }
}
