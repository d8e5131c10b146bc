//! Name-unique, insertion-ordered collections.
//!
//! [`UniqueCollection`] holds components, devices and rooms alike. Names are
//! compared case-insensitively and at most one entry per name is ever stored.
//! Adding takes `&mut self`, so the uniqueness check and the insert form one
//! step for any caller; callers sharing a collection across threads wrap it in
//! a lock and hold the guard for the whole add.

use crate::error::{DuplicateNameError, NotFoundError, SmartHomeError};

/// Anything stored in a [`UniqueCollection`].
pub trait Named {
    fn name(&self) -> &str;
}

/// Why [`UniqueCollection::try_add`] did not insert.
#[derive(Debug, thiserror::Error)]
pub enum AddError<E> {
    #[error(transparent)]
    Duplicate(#[from] DuplicateNameError),
    #[error(transparent)]
    Construct(E),
}

impl<E> From<AddError<E>> for SmartHomeError
where
    SmartHomeError: From<E>,
{
    fn from(err: AddError<E>) -> Self {
        match err {
            AddError::Duplicate(err) => err.into(),
            AddError::Construct(err) => err.into(),
        }
    }
}

/// Ordered collection with case-insensitive unique names.
#[derive(Debug, Clone)]
pub struct UniqueCollection<T> {
    label: &'static str,
    items: Vec<T>,
}

/// Unicode lowercase folding shared by every case-insensitive name in the crate.
pub(crate) fn fold_case(name: &str) -> impl Iterator<Item = char> + '_ {
    name.chars().flat_map(char::to_lowercase)
}

/// Case-insensitive name comparison, Unicode-aware.
pub(crate) fn same_name(a: &str, b: &str) -> bool {
    fold_case(a).eq(fold_case(b))
}

impl<T: Named> UniqueCollection<T> {
    /// Create an empty collection; `label` names its entries in errors.
    #[must_use]
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            items: Vec::new(),
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Insert the entry produced by `construct` under `name`.
    ///
    /// `construct` is not called when `name` is already taken. An entry whose
    /// own name collides with an existing one is discarded as well.
    ///
    /// # Errors
    ///
    /// Returns [`AddError::Duplicate`] when the name is taken and
    /// [`AddError::Construct`] when `construct` fails. The collection is left
    /// unchanged in both cases.
    pub fn try_add<E, F>(&mut self, name: &str, construct: F) -> Result<&mut T, AddError<E>>
    where
        F: FnOnce() -> Result<T, E>,
    {
        if self.contains(name) {
            return Err(self.duplicate(name).into());
        }
        let item = construct().map_err(AddError::Construct)?;
        if !same_name(item.name(), name) && self.contains(item.name()) {
            return Err(self.duplicate(item.name()).into());
        }
        self.items.push(item);
        let last = self.items.len() - 1;
        Ok(&mut self.items[last])
    }

    /// Boolean form of [`try_add`](Self::try_add): `true` when inserted.
    pub fn add<E, F>(&mut self, name: &str, construct: F) -> bool
    where
        F: FnOnce() -> Result<T, E>,
    {
        self.try_add(name, construct).is_ok()
    }

    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&T> {
        self.position(name).map(|idx| &self.items[idx])
    }

    #[must_use]
    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut T> {
        self.position(name).map(|idx| &mut self.items[idx])
    }

    /// Like [`find_by_name`](Self::find_by_name) but with a typed error.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] if no entry has this name.
    pub fn get(&self, name: &str) -> Result<&T, NotFoundError> {
        self.find_by_name(name).ok_or_else(|| self.not_found(name))
    }

    /// Mutable counterpart of [`get`](Self::get).
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] if no entry has this name.
    pub fn get_mut(&mut self, name: &str) -> Result<&mut T, NotFoundError> {
        let label = self.label;
        self.find_by_name_mut(name).ok_or_else(|| NotFoundError {
            entity: label,
            id: name.to_string(),
        })
    }

    /// Snapshot of the entries in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<&T> {
        self.items.iter().collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|item| same_name(item.name(), name))
    }

    fn duplicate(&self, name: &str) -> DuplicateNameError {
        DuplicateNameError {
            collection: self.label,
            name: name.to_string(),
        }
    }

    fn not_found(&self, name: &str) -> NotFoundError {
        NotFoundError {
            entity: self.label,
            id: name.to_string(),
        }
    }
}

impl<'a, T> IntoIterator for &'a UniqueCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
