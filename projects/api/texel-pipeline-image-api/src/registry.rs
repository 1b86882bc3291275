//! Fixed-capacity table of file handlers.

use crate::error::{ImageError, ImageResult};
use crate::handler::ImageFileHandler;
use log::debug;

/// Number of handler slots in a [`FileHandlerRegistry`].
pub const MAX_FILE_HANDLERS: usize = 8;

/// Slot a handler was registered into.
///
/// Ids are handed out lowest free slot first and stay valid until the handler
/// is removed; a removed slot's id may be reused by a later registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(usize);

impl HandlerId {
    /// Slot index in `0..MAX_FILE_HANDLERS`.
    pub fn index(self) -> usize {
        self.0
    }

    /// The id of slot `index`, if it exists.
    pub fn from_index(index: usize) -> Option<Self> {
        (index < MAX_FILE_HANDLERS).then_some(Self(index))
    }
}

/// Handlers addressed by [`HandlerId`]; callers pick the handler explicitly.
pub struct FileHandlerRegistry {
    slots: [Option<Box<dyn ImageFileHandler>>; MAX_FILE_HANDLERS],
}

impl Default for FileHandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for FileHandlerRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|(id, handler)| (id.index(), handler.name())))
            .finish()
    }
}

impl FileHandlerRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| None),
        }
    }

    /// Adds a handler to the lowest free slot.
    ///
    /// # Errors
    ///
    /// [`ImageError::HandlerTableFull`] when every slot is taken.
    pub fn register(&mut self, handler: Box<dyn ImageFileHandler>) -> ImageResult<HandlerId> {
        let index = self
            .slots
            .iter()
            .position(Option::is_none)
            .ok_or(ImageError::HandlerTableFull)?;
        debug!("Registered file handler '{}' as #{index}", handler.name());
        self.slots[index] = Some(handler);
        Ok(HandlerId(index))
    }

    /// Removes and returns a handler.
    ///
    /// # Errors
    ///
    /// [`ImageError::NoHandler`] if the slot is empty.
    pub fn remove(&mut self, id: HandlerId) -> ImageResult<Box<dyn ImageFileHandler>> {
        let handler = self.slots[id.0].take().ok_or(ImageError::NoHandler(id))?;
        debug!("Removed file handler '{}' from #{}", handler.name(), id.0);
        Ok(handler)
    }

    /// Looks up a handler.
    ///
    /// # Errors
    ///
    /// [`ImageError::NoHandler`] if the slot is empty.
    pub fn get(&self, id: HandlerId) -> ImageResult<&dyn ImageFileHandler> {
        self.slots[id.0]
            .as_deref()
            .ok_or(ImageError::NoHandler(id))
    }

    /// Registered handlers in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (HandlerId, &dyn ImageFileHandler)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_deref().map(|handler| (HandlerId(i), handler)))
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Whether no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
