//! Homogeneous record lists.
//!
//! A [`RecordList`] holds records of exactly one [`RecordType`]. Every
//! insertion point checks the incoming record's type before the list is
//! touched; batch writes check the whole batch first.

use std::fmt;
use std::ops::RangeBounds;

use super::builder::RecordType;
use super::instance::{Args, Record, RecordMut};
use super::range;
use super::view::{FieldView, FieldViewMut};
use crate::error::{DataError, DataResult};

/// An ordered, mutable list of records of one type.
#[derive(Clone)]
pub struct RecordList {
    value_type: RecordType,
    items: Vec<Record>,
}

impl RecordType {
    /// An empty list of this type.
    pub fn new_list(&self) -> RecordList {
        RecordList::new(self.clone())
    }

    /// A list holding `records`, each checked for membership.
    pub fn list_from<I>(&self, records: I) -> DataResult<RecordList>
    where
        I: IntoIterator<Item = Record>,
    {
        RecordList::from_records(self.clone(), records)
    }
}

impl RecordList {
    pub fn new(value_type: RecordType) -> Self {
        Self {
            value_type,
            items: Vec::new(),
        }
    }

    pub fn from_records<I>(value_type: RecordType, records: I) -> DataResult<Self>
    where
        I: IntoIterator<Item = Record>,
    {
        let mut list = Self::new(value_type);
        for record in records {
            list.append(record)?;
        }
        Ok(list)
    }

    pub fn value_type(&self) -> &RecordType {
        &self.value_type
    }

    /// Name of the list type, e.g. `FooList`.
    pub fn type_name(&self) -> &str {
        self.value_type.list_name()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.items.iter()
    }

    /// Field-level mutable access to every record. Assignments are not
    /// validated.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = RecordMut<'_>> {
        self.items.iter_mut().map(RecordMut::new)
    }

    pub fn as_slice(&self) -> &[Record] {
        &self.items
    }

    pub fn get(&self, index: usize) -> DataResult<&Record> {
        let len = self.items.len();
        self.items
            .get(index)
            .ok_or(DataError::IndexOutOfRange { index, len })
    }

    /// Field-level mutable access to the record at `index`.
    pub fn get_mut(&mut self, index: usize) -> DataResult<RecordMut<'_>> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .map(RecordMut::new)
            .ok_or(DataError::IndexOutOfRange { index, len })
    }

    /// A new list of the same type holding copies of the addressed records.
    pub fn slice<R: RangeBounds<usize>>(&self, bounds: R) -> RecordList {
        let range = range::resolve(bounds, self.items.len());
        Self {
            value_type: self.value_type.clone(),
            items: self.items[range].to_vec(),
        }
    }

    /// Replace the record at `index`.
    pub fn set(&mut self, index: usize, record: Record) -> DataResult<()> {
        self.admit(&record)?;
        let len = self.items.len();
        let slot = self
            .items
            .get_mut(index)
            .ok_or(DataError::IndexOutOfRange { index, len })?;
        *slot = record;
        Ok(())
    }

    /// Replace the addressed range with `records`; the list grows or shrinks
    /// to fit. Nothing changes unless every record is admitted.
    pub fn set_slice<R, I>(&mut self, bounds: R, records: I) -> DataResult<()>
    where
        R: RangeBounds<usize>,
        I: IntoIterator<Item = Record>,
    {
        let records: Vec<Record> = records.into_iter().collect();
        for record in &records {
            self.admit(record)?;
        }
        let range = range::resolve(bounds, self.items.len());
        self.items.splice(range, records);
        Ok(())
    }

    pub fn append(&mut self, record: Record) -> DataResult<()> {
        self.admit(&record)?;
        self.items.push(record);
        Ok(())
    }

    /// Insert before `index`; indices past the end append.
    pub fn insert(&mut self, index: usize, record: Record) -> DataResult<()> {
        self.admit(&record)?;
        let index = index.min(self.items.len());
        self.items.insert(index, record);
        Ok(())
    }

    /// Append records one at a time. Records appended before a rejected one
    /// stay in the list.
    pub fn extend<I>(&mut self, records: I) -> DataResult<()>
    where
        I: IntoIterator<Item = Record>,
    {
        for record in records {
            self.append(record)?;
        }
        Ok(())
    }

    /// Construct a record of the list's type and append it.
    pub fn append_new(&mut self, args: Args) -> DataResult<()> {
        let record = self.value_type.construct(args)?;
        self.append(record)
    }

    /// Construct a record of the list's type and insert it before `index`.
    pub fn insert_new(&mut self, index: usize, args: Args) -> DataResult<()> {
        let record = self.value_type.construct(args)?;
        self.insert(index, record)
    }

    pub fn remove(&mut self, index: usize) -> DataResult<Record> {
        let len = self.items.len();
        if index >= len {
            return Err(DataError::IndexOutOfRange { index, len });
        }
        Ok(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Field view by column accessor, e.g. `xs` for field `x`.
    pub fn column(&self, accessor: &str) -> DataResult<FieldView<'_>> {
        let field = self.resolve_column(accessor)?;
        Ok(FieldView::new(self, field))
    }

    /// Writable field view by column accessor.
    pub fn column_mut(&mut self, accessor: &str) -> DataResult<FieldViewMut<'_>> {
        let field = self.resolve_column(accessor)?;
        Ok(FieldViewMut::new(self, field))
    }

    /// Field view by field name.
    pub fn field_view(&self, field: &str) -> DataResult<FieldView<'_>> {
        let field = self.resolve_field(field)?;
        Ok(FieldView::new(self, field))
    }

    /// Writable field view by field name.
    pub fn field_view_mut(&mut self, field: &str) -> DataResult<FieldViewMut<'_>> {
        let field = self.resolve_field(field)?;
        Ok(FieldViewMut::new(self, field))
    }

    fn resolve_column(&self, accessor: &str) -> DataResult<usize> {
        self.value_type
            .column(accessor)
            .ok_or_else(|| DataError::UnknownField {
                type_name: self.type_name().to_string(),
                field: accessor.to_string(),
            })
    }

    fn resolve_field(&self, field: &str) -> DataResult<usize> {
        self.value_type
            .field_index(field)
            .ok_or_else(|| DataError::UnknownField {
                type_name: self.value_type.name().to_string(),
                field: field.to_string(),
            })
    }

    pub(crate) fn records(&self) -> &[Record] {
        &self.items
    }

    pub(crate) fn records_mut(&mut self) -> &mut [Record] {
        &mut self.items
    }

    fn admit(&self, record: &Record) -> DataResult<()> {
        if record.record_type() == &self.value_type {
            return Ok(());
        }
        tracing::trace!(
            list = %self.type_name(),
            actual = %record.record_type().name(),
            "record rejected by list"
        );
        Err(DataError::WrongRecordType {
            list: self.type_name().to_string(),
            expected: self.value_type.name().to_string(),
            actual: record.record_type().name().to_string(),
        })
    }
}

impl PartialEq for RecordList {
    fn eq(&self, other: &Self) -> bool {
        self.value_type == other.value_type && self.items == other.items
    }
}

impl<'a> IntoIterator for &'a RecordList {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for RecordList {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl fmt::Display for RecordList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self.items.iter().map(Record::to_string).collect();
        write!(f, "[{}]", lines.join("\n "))
    }
}

impl fmt::Debug for RecordList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self.items.iter().map(|r| format!("{:?}", r)).collect();
        write!(f, "[{}]", lines.join(",\n "))
    }
}
