//! Field views: one field projected across every record of a list.
//!
//! Views never copy field values. Reads and writes go straight to the
//! records of the list they were taken from. Slicing a view yields a view
//! over a new sub-list built by [`RecordList::slice`].

use std::borrow::Cow;
use std::fmt;
use std::ops::RangeBounds;

use serde_json::Value;

use super::list::RecordList;
use super::range;
use crate::error::{DataError, DataResult};

/// Read-only view of one field across a record list.
#[derive(Clone)]
pub struct FieldView<'a> {
    container: Cow<'a, RecordList>,
    field: usize,
}

impl<'a> FieldView<'a> {
    pub(crate) fn new(container: &'a RecordList, field: usize) -> Self {
        Self {
            container: Cow::Borrowed(container),
            field,
        }
    }

    pub fn field_name(&self) -> &str {
        self.container.value_type().field_name_at(self.field)
    }

    pub fn len(&self) -> usize {
        self.container.len()
    }

    pub fn is_empty(&self) -> bool {
        self.container.is_empty()
    }

    /// The list this view reads from.
    pub fn container(&self) -> &RecordList {
        &self.container
    }

    pub fn get(&self, index: usize) -> DataResult<&Value> {
        Ok(self.container.get(index)?.value_at(self.field))
    }

    /// A view of the same field over `list.slice(bounds)`.
    pub fn slice<R: RangeBounds<usize>>(&self, bounds: R) -> FieldView<'static> {
        FieldView {
            container: Cow::Owned(self.container.slice(bounds)),
            field: self.field,
        }
    }

    /// Current field values, read when the iterator advances.
    pub fn iter(&self) -> impl Iterator<Item = &Value> + '_ {
        self.container
            .records()
            .iter()
            .map(move |record| record.value_at(self.field))
    }

    pub fn to_vec(&self) -> Vec<Value> {
        self.iter().cloned().collect()
    }
}

impl fmt::Display for FieldView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<String> = self.iter().map(Value::to_string).collect();
        write!(f, "[{}]", values.join(", "))
    }
}

impl fmt::Debug for FieldView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Writable view of one field across a record list.
///
/// Assignments are not validated, like [`crate::Record::set`].
pub struct FieldViewMut<'a> {
    container: &'a mut RecordList,
    field: usize,
}

impl<'a> FieldViewMut<'a> {
    pub(crate) fn new(container: &'a mut RecordList, field: usize) -> Self {
        Self { container, field }
    }

    pub fn field_name(&self) -> &str {
        self.container.value_type().field_name_at(self.field)
    }

    pub fn len(&self) -> usize {
        self.container.len()
    }

    pub fn is_empty(&self) -> bool {
        self.container.is_empty()
    }

    pub fn get(&self, index: usize) -> DataResult<&Value> {
        Ok(self.container.get(index)?.value_at(self.field))
    }

    /// Assign the field of the record at `index`.
    pub fn set(&mut self, index: usize, value: impl Into<Value>) -> DataResult<()> {
        let len = self.container.len();
        let record = self
            .container
            .records_mut()
            .get_mut(index)
            .ok_or(DataError::IndexOutOfRange { index, len })?;
        *record.value_at_mut(self.field) = value.into();
        Ok(())
    }

    /// Assign the field across the addressed range, pairing records with
    /// `values` in order. Pairing stops at whichever runs out first; records
    /// outside the range are never touched.
    pub fn set_slice<R, I, V>(&mut self, bounds: R, values: I)
    where
        R: RangeBounds<usize>,
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let field = self.field;
        let range = range::resolve(bounds, self.container.len());
        let targets = &mut self.container.records_mut()[range];
        for (record, value) in targets.iter_mut().zip(values) {
            *record.value_at_mut(field) = value.into();
        }
    }

    pub fn slice<R: RangeBounds<usize>>(&self, bounds: R) -> FieldView<'static> {
        self.as_view().slice(bounds)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> + '_ {
        let field = self.field;
        self.container
            .records()
            .iter()
            .map(move |record| record.value_at(field))
    }

    /// Reborrow as a read-only view.
    pub fn as_view(&self) -> FieldView<'_> {
        FieldView::new(&*self.container, self.field)
    }
}

impl fmt::Display for FieldViewMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.as_view(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use crate::record::builder::RecordType;
    use crate::record::spec::Required;
    use serde_json::json;

    fn xs() -> RecordList {
        let foo = RecordType::builder("Foo").field("x", Required).build().unwrap();
        foo.list_from(vec![
            foo.construct(args! { x: 1 }).unwrap(),
            foo.construct(args! { x: 2 }).unwrap(),
            foo.construct(args! { x: 3 }).unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn test_getitem() {
        let fs = xs();
        let view = fs.column("xs").unwrap();
        assert_eq!(view.len(), 3);
        assert_eq!(view.field_name(), "x");
        assert_eq!(view.get(0).unwrap(), &json!(1));
        assert_eq!(view.get(1).unwrap(), &json!(2));
        assert_eq!(view.get(2).unwrap(), &json!(3));
        assert!(view.get(3).is_err());
    }

    #[test]
    fn test_setitem_writes_through() {
        let mut fs = xs();
        fs.column_mut("xs").unwrap().set(1, 100).unwrap();
        assert_eq!(fs.get(1).unwrap().get("x"), Some(&json!(100)));
        assert_eq!(fs.column("xs").unwrap().to_vec(), vec![json!(1), json!(100), json!(3)]);
    }

    #[test]
    fn test_getslice() {
        let fs = xs();
        let view = fs.column("xs").unwrap().slice(1..);
        assert_eq!(view.len(), 2);
        assert_eq!(view.get(0).unwrap(), &json!(2));
        assert_eq!(view.get(1).unwrap(), &json!(3));
        assert_eq!(view.container().value_type(), fs.value_type());
    }

    #[test]
    fn test_setslice() {
        let mut fs = xs();
        fs.column_mut("xs").unwrap().set_slice(1.., [100, 200]);
        assert_eq!(fs.column("xs").unwrap().to_vec(), vec![json!(1), json!(100), json!(200)]);
    }

    #[test]
    fn test_setslice_truncates_to_shorter() {
        let mut fs = xs();
        let mut view = fs.column_mut("xs").unwrap();
        view.set_slice(.., [10]);
        assert_eq!(view.as_view().to_vec(), vec![json!(10), json!(2), json!(3)]);
        view.set_slice(2.., [30, 40, 50]);
        assert_eq!(view.as_view().to_vec(), vec![json!(10), json!(2), json!(30)]);
        assert_eq!(view.len(), 3);
    }

    #[test]
    fn test_iter_is_restartable_and_live() {
        let mut fs = xs();
        {
            let view = fs.column("xs").unwrap();
            let first: Vec<&Value> = view.iter().collect();
            let second: Vec<&Value> = view.iter().collect();
            assert_eq!(first, second);
            assert_eq!(first, vec![&json!(1), &json!(2), &json!(3)]);
        }
        fs.get_mut(0).unwrap().set("x", 7).unwrap();
        let view = fs.column("xs").unwrap();
        assert_eq!(view.iter().next(), Some(&json!(7)));
    }

    #[test]
    fn test_display() {
        let foo = RecordType::builder("Tag").field("label", Required).build().unwrap();
        let mut tags = foo.new_list();
        tags.append_new(args! { label: "a" }).unwrap();
        tags.append_new(args! { label: "b" }).unwrap();
        assert_eq!(tags.column("labels").unwrap().to_string(), "[\"a\", \"b\"]");
    }
}
