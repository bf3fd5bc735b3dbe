use serde::{Deserialize, Serialize};

use super::field::{Field, FieldKind};
use crate::error::{Result, SchemaGenError};

/// A single UI event against a [`FieldList`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Edit {
    AddField,
    DeleteField { index: usize },
    DuplicateField { index: usize },
    MoveField { from: usize, to: usize },
    SetKey { index: usize, value: String },
    SetDescription { index: usize, value: String },
    SetKind { index: usize, value: String },
    SetOption { item_index: usize, option_index: usize, value: String },
    AddOption { item_index: usize },
    DeleteOption { item_index: usize, option_index: usize },
}

/// Ordered field definitions. Order is significant: it is the `oneOf` order
/// of the generated schema.
///
/// Every edit takes `&self` and returns a fresh list; the receiver is never
/// touched, so callers can compare old and new values to drive re-rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldList(Vec<Field>);

impl FieldList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Field> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.0.iter()
    }

    /// Appends a blank text field.
    pub fn add_field(&self) -> Self {
        let mut fields = self.0.clone();
        fields.push(Field::default());
        Self(fields)
    }

    pub fn delete_field(&self, index: usize) -> Result<Self> {
        self.check_index(index)?;
        let mut fields = self.0.clone();
        fields.remove(index);
        Ok(Self(fields))
    }

    /// Inserts a copy of `index` right after it. The copy owns its own options.
    pub fn duplicate_field(&self, index: usize) -> Result<Self> {
        self.check_index(index)?;
        let mut fields = self.0.clone();
        let copy = fields[index].clone();
        fields.insert(index + 1, copy);
        Ok(Self(fields))
    }

    /// Moves the field at `from` so it ends up at position `to`.
    pub fn move_field(&self, from: usize, to: usize) -> Result<Self> {
        self.check_index(from)?;
        self.check_index(to)?;
        let mut fields = self.0.clone();
        let field = fields.remove(from);
        fields.insert(to, field);
        Ok(Self(fields))
    }

    pub fn set_key(&self, index: usize, value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        self.edit_at(index, |field| {
            field.key = value;
            Ok(())
        })
    }

    pub fn set_description(&self, index: usize, value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        self.edit_at(index, |field| {
            field.description = value;
            Ok(())
        })
    }

    /// Switches the kind of a field. Unknown kind names are rejected and the
    /// field keeps its previous kind. Switching to `text` drops the options.
    pub fn set_kind(&self, index: usize, value: &str) -> Result<Self> {
        let kind: FieldKind = value.parse()?;
        self.edit_at(index, |field| {
            field.kind = kind;
            if !kind.is_select() {
                field.options = None;
            }
            Ok(())
        })
    }

    pub fn set_option(
        &self,
        item_index: usize,
        option_index: usize,
        value: impl Into<String>,
    ) -> Result<Self> {
        let value = value.into();
        self.edit_at(item_index, |field| {
            let options = field
                .options
                .as_mut()
                .ok_or(SchemaGenError::MissingOptions { index: item_index })?;
            let len = options.len();
            let slot = options
                .get_mut(option_index)
                .ok_or(SchemaGenError::IndexOutOfRange { index: option_index, len })?;
            *slot = value;
            Ok(())
        })
    }

    /// Appends an empty option, creating the option list on first use.
    pub fn add_option(&self, item_index: usize) -> Result<Self> {
        self.edit_at(item_index, |field| {
            if !field.kind.is_select() {
                return Err(SchemaGenError::NotSelect { index: item_index });
            }
            field.options.get_or_insert_with(Vec::new).push(String::new());
            Ok(())
        })
    }

    pub fn delete_option(&self, item_index: usize, option_index: usize) -> Result<Self> {
        self.edit_at(item_index, |field| {
            let options = field
                .options
                .as_mut()
                .ok_or(SchemaGenError::MissingOptions { index: item_index })?;
            if option_index >= options.len() {
                return Err(SchemaGenError::IndexOutOfRange {
                    index: option_index,
                    len: options.len(),
                });
            }
            options.remove(option_index);
            Ok(())
        })
    }

    pub fn try_apply(&self, edit: &Edit) -> Result<Self> {
        match edit {
            Edit::AddField => Ok(self.add_field()),
            Edit::DeleteField { index } => self.delete_field(*index),
            Edit::DuplicateField { index } => self.duplicate_field(*index),
            Edit::MoveField { from, to } => self.move_field(*from, *to),
            Edit::SetKey { index, value } => self.set_key(*index, value.as_str()),
            Edit::SetDescription { index, value } => self.set_description(*index, value.as_str()),
            Edit::SetKind { index, value } => self.set_kind(*index, value),
            Edit::SetOption { item_index, option_index, value } => {
                self.set_option(*item_index, *option_index, value.as_str())
            }
            Edit::AddOption { item_index } => self.add_option(*item_index),
            Edit::DeleteOption { item_index, option_index } => {
                self.delete_option(*item_index, *option_index)
            }
        }
    }

    /// Applies an edit, recovering from any error by returning the list
    /// unchanged.
    pub fn apply(&self, edit: &Edit) -> Self {
        match self.try_apply(edit) {
            Ok(list) => list,
            Err(e) => {
                log::warn!("Ignoring edit {edit:?}: {e}");
                self.clone()
            }
        }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.0.len() {
            Ok(())
        } else {
            Err(SchemaGenError::IndexOutOfRange { index, len: self.0.len() })
        }
    }

    fn edit_at<F>(&self, index: usize, edit: F) -> Result<Self>
    where
        F: FnOnce(&mut Field) -> Result<()>,
    {
        self.check_index(index)?;
        let mut fields = self.0.clone();
        edit(&mut fields[index])?;
        Ok(Self(fields))
    }
}

impl From<Vec<Field>> for FieldList {
    fn from(fields: Vec<Field>) -> Self {
        Self(fields)
    }
}

impl FromIterator<Field> for FieldList {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a FieldList {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for FieldList {
    type Item = Field;
    type IntoIter = std::vec::IntoIter<Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
