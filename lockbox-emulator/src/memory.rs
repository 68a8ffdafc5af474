use std::collections::BTreeMap;

use lockbox_core::register::{RegisterError, RegisterFile};

/// Word-addressed register memory. Unwritten words read as zero.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegisterMemory {
    words: BTreeMap<u32, u32>,
    fault_after: Option<usize>,
    write_count: usize,
}

impl RegisterMemory {
    /// Creates an empty [`RegisterMemory`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            words: BTreeMap::new(),
            fault_after: None,
            write_count: 0,
        }
    }

    /// Makes the write after the next `writes` successful ones fail once.
    pub fn inject_fault(&mut self, writes: usize) {
        self.fault_after = Some(writes);
    }

    /// Number of successful writes so far.
    #[must_use]
    pub const fn write_count(&self) -> usize {
        self.write_count
    }

    /// Words written so far, by address.
    #[must_use]
    pub const fn words(&self) -> &BTreeMap<u32, u32> {
        &self.words
    }

    fn check_alignment(address: u32) -> Result<(), RegisterError> {
        if address % 4 != 0 {
            return Err(RegisterError::new(format!(
                "Address {:#010X} is not aligned to a word",
                address
            )));
        }
        Ok(())
    }
}

impl RegisterFile for RegisterMemory {
    fn read(&self, address: u32) -> Result<u32, RegisterError> {
        Self::check_alignment(address)?;
        Ok(self.words.get(&address).copied().unwrap_or(0))
    }

    fn write(&mut self, address: u32, value: u32) -> Result<(), RegisterError> {
        Self::check_alignment(address)?;
        match self.fault_after {
            Some(0) => {
                self.fault_after = None;
                tracing::debug!("Injected fault at {:#010X}", address);
                return Err(RegisterError::new(format!(
                    "Write to {:#010X} failed",
                    address
                )));
            }
            Some(n) => self.fault_after = Some(n - 1),
            None => {}
        }
        self.words.insert(address, value);
        self.write_count += 1;
        Ok(())
    }
}
