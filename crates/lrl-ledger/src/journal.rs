//! Durable, crash-recoverable ledger store backed by an append-only
//! journal.
//!
//! On-disk format, one frame per [`LedgerEvent`]:
//! ```text
//! [4 bytes: payload length (little-endian u32)]
//! [4 bytes: CRC32 of payload (little-endian u32)]
//! [N bytes: payload (bincode-serialized LedgerEvent)]
//! ```
//!
//! The journal append is the commit point: an event is written (and, by
//! default, fsynced) before it is applied to memory. Recovery reads the
//! file front-to-back and stops at the first frame that fails its length
//! or CRC check; such a frame is a torn write from a crash, and the
//! events before it are exactly the committed prefix.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use lrl_types::{Address, Property, PropertyId, TransactionRecord, TxRef};
use tracing::{debug, info, warn};

use crate::error::LedgerError;
use crate::event::LedgerEvent;
use crate::state::LedgerState;
use crate::traits::{LedgerReader, LedgerWriter};

/// Header size: 4 bytes length + 4 bytes CRC.
const HEADER_SIZE: usize = 8;

/// Flush/sync strategy for journal appends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SyncMode {
    /// `fsync` after every append. A confirmed commit survives power loss.
    #[default]
    EveryWrite,
    /// Rely on OS page-cache buffering (faster, least durable).
    OsDefault,
}

struct JournalWriter {
    writer: BufWriter<File>,
    /// Current write offset in the journal file.
    offset: u64,
}

/// Append-only event journal with length + CRC framing.
pub struct Journal {
    path: PathBuf,
    writer: Mutex<JournalWriter>,
    sync_mode: SyncMode,
}

impl Journal {
    /// Open (or create) the journal file at the given path.
    pub fn open(path: &Path, sync_mode: SyncMode) -> Result<Self, LedgerError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(path)
            .map_err(io_err)?;

        let offset = file.metadata().map_err(io_err)?.len();
        Ok(Self {
            path: path.to_path_buf(),
            writer: Mutex::new(JournalWriter {
                writer: BufWriter::new(file),
                offset,
            }),
            sync_mode,
        })
    }

    /// Append one event. Returns the byte offset of the frame.
    pub fn append(&self, event: &LedgerEvent) -> Result<u64, LedgerError> {
        let payload =
            bincode::serialize(event).map_err(|e| LedgerError::Serialization(e.to_string()))?;
        let length = payload.len() as u32;
        let crc = crc32fast::hash(&payload);

        let mut w = self.writer.lock().map_err(|_| LedgerError::LockPoisoned)?;
        let frame_offset = w.offset;

        w.writer.write_all(&length.to_le_bytes()).map_err(io_err)?;
        w.writer.write_all(&crc.to_le_bytes()).map_err(io_err)?;
        w.writer.write_all(&payload).map_err(io_err)?;
        w.writer.flush().map_err(io_err)?;
        if self.sync_mode == SyncMode::EveryWrite {
            w.writer.get_ref().sync_all().map_err(io_err)?;
        }

        w.offset += HEADER_SIZE as u64 + payload.len() as u64;
        debug!(offset = frame_offset, len = payload.len(), "journal append");
        Ok(frame_offset)
    }

    /// Recover the committed event prefix from the journal.
    ///
    /// Stops at the first frame with an invalid length, a truncated
    /// payload, or a CRC mismatch; everything before it is returned.
    pub fn recover(&self) -> Result<Vec<LedgerEvent>, LedgerError> {
        let mut file = BufReader::new(File::open(&self.path).map_err(io_err)?);
        let file_len = file.get_ref().metadata().map_err(io_err)?.len();
        let mut events = Vec::new();
        let mut offset: u64 = 0;

        while offset + HEADER_SIZE as u64 <= file_len {
            file.seek(SeekFrom::Start(offset)).map_err(io_err)?;

            let mut header = [0u8; HEADER_SIZE];
            match file.read_exact(&mut header) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(io_err(e)),
            }

            let length = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
            let expected_crc = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);

            if length == 0 || (offset + HEADER_SIZE as u64 + length as u64) > file_len {
                warn!(offset, length, file_len, "torn journal frame; stopping recovery");
                break;
            }

            let mut payload = vec![0u8; length as usize];
            match file.read_exact(&mut payload) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    warn!(offset, "truncated journal frame; stopping recovery");
                    break;
                }
                Err(e) => return Err(io_err(e)),
            }

            if crc32fast::hash(&payload) != expected_crc {
                warn!(offset, "journal CRC mismatch; stopping recovery");
                break;
            }

            match bincode::deserialize::<LedgerEvent>(&payload) {
                Ok(event) => events.push(event),
                Err(e) => {
                    warn!(offset, error = %e, "undecodable journal frame; stopping recovery");
                    break;
                }
            }

            offset += HEADER_SIZE as u64 + length as u64;
        }

        debug!(recovered = events.len(), "journal recovery complete");
        Ok(events)
    }

    /// Current write offset.
    pub fn offset(&self) -> Result<u64, LedgerError> {
        Ok(self
            .writer
            .lock()
            .map_err(|_| LedgerError::LockPoisoned)?
            .offset)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn io_err(e: io::Error) -> LedgerError {
    LedgerError::Persistence(e.to_string())
}

/// Durable ledger store: an in-memory state image in front of the
/// append-only [`Journal`].
///
/// Writes stage against the in-memory state, append the resulting event
/// to the journal, and only then apply it, all inside one write critical
/// section. A failed journal append therefore leaves memory untouched,
/// and a confirmed operation is on disk.
pub struct JournalLedger {
    state: RwLock<LedgerState>,
    journal: Journal,
}

impl JournalLedger {
    /// Open the journal at `path` and rebuild state from it.
    pub fn open(path: &Path, sync_mode: SyncMode) -> Result<Self, LedgerError> {
        let journal = Journal::open(path, sync_mode)?;
        let events = journal.recover()?;

        let mut state = LedgerState::new();
        for event in &events {
            state.apply(event)?;
        }
        info!(
            path = %path.display(),
            events = events.len(),
            "ledger journal recovered"
        );

        Ok(Self {
            state: RwLock::new(state),
            journal,
        })
    }

    /// The underlying journal (offsets, path).
    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, LedgerState>, LedgerError> {
        self.state.read().map_err(|_| LedgerError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, LedgerState>, LedgerError> {
        self.state.write().map_err(|_| LedgerError::LockPoisoned)
    }
}

impl LedgerWriter for JournalLedger {
    fn register(
        &self,
        property_number: &str,
        owner: Address,
        location: &str,
        document_ref: &str,
    ) -> Result<Property, LedgerError> {
        let mut state = self.write()?;
        let event = state.stage_register(property_number, owner, location, document_ref);
        self.journal.append(&event)?;
        state.apply(&event)?;
        match event {
            LedgerEvent::Registered(property) => Ok(property),
            _ => unreachable!(),
        }
    }

    fn mark_verified(&self, id: PropertyId) -> Result<Property, LedgerError> {
        let mut state = self.write()?;
        if let Some(event) = state.stage_verify(id)? {
            self.journal.append(&event)?;
            state.apply(&event)?;
        }
        state.property(id).ok_or(LedgerError::NotFound(id))
    }

    fn commit_transfer(
        &self,
        id: PropertyId,
        expected_owner: Address,
        new_owner: Address,
    ) -> Result<TransactionRecord, LedgerError> {
        let mut state = self.write()?;
        let event = state.stage_transfer(id, expected_owner, new_owner)?;
        self.journal.append(&event)?;
        state.apply(&event)?;
        match event {
            LedgerEvent::Transferred(record) => Ok(record),
            _ => unreachable!(),
        }
    }
}

impl LedgerReader for JournalLedger {
    fn property(&self, id: PropertyId) -> Result<Option<Property>, LedgerError> {
        Ok(self.read()?.property(id))
    }

    fn properties(&self) -> Result<Vec<Property>, LedgerError> {
        Ok(self.read()?.properties())
    }

    fn properties_owned_by(&self, owner: &Address) -> Result<Vec<Property>, LedgerError> {
        Ok(self.read()?.properties_owned_by(owner))
    }

    fn log(&self) -> Result<Vec<TransactionRecord>, LedgerError> {
        Ok(self.read()?.log())
    }

    fn log_len(&self) -> Result<u64, LedgerError> {
        Ok(self.read()?.log_len())
    }

    fn history_for_property(
        &self,
        id: PropertyId,
    ) -> Result<Vec<TransactionRecord>, LedgerError> {
        Ok(self.read()?.history_for_property(id))
    }

    fn history_for_address(
        &self,
        address: &Address,
    ) -> Result<Vec<TransactionRecord>, LedgerError> {
        Ok(self.read()?.history_for_address(address))
    }

    fn transaction_by_ref(
        &self,
        tx_ref: &TxRef,
    ) -> Result<Option<TransactionRecord>, LedgerError> {
        Ok(self.read()?.transaction_by_ref(tx_ref))
    }
}
