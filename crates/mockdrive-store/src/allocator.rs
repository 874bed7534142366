use mockdrive_types::EntryId;

/// Issues entry identifiers from a per-store counter.
///
/// The counter starts at 0 and each allocation returns its decimal form.
/// Allocators are owned by a store; two stores never share a sequence.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    /// A fresh counter starting at 0.
    pub fn new() -> Self {
        Self { next: 0 }
    }

    /// Return the next identifier and advance the counter.
    pub fn allocate(&mut self) -> EntryId {
        let id = EntryId::new(self.next.to_string());
        self.next += 1;
        id
    }

    /// Allocate, skipping any candidate for which `taken` returns `true`.
    ///
    /// A caller-supplied root id may coincide with a counter value; skipping
    /// keeps ids unique within the store.
    pub fn allocate_unused(&mut self, mut taken: impl FnMut(&EntryId) -> bool) -> EntryId {
        loop {
            let id = self.allocate();
            if !taken(&id) {
                return id;
            }
        }
    }
}
