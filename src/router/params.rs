use std::ops::Deref;
use std::str::FromStr;

use smallvec::SmallVec;

/// The key under which a trailing `*` segment is captured.
pub const REST_KEY: &str = "*";

/// Path parameters extracted by a match.
///
/// Keys are unique: inserting an existing name overwrites its value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    buf: SmallVec<[(Box<str>, String); 4]>,
}

impl Params {
    pub fn new() -> Self {
        Self {
            buf: SmallVec::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.buf
            .iter()
            .find_map(|(k, v)| if &**k == name { Some(v.as_str()) } else { None })
    }

    pub fn parse<T: FromStr>(&self, name: &str) -> Option<Result<T, T::Err>> {
        self.get(name).map(T::from_str)
    }

    /// Value captured by the trailing `*` segment, if it captured anything.
    pub fn rest(&self) -> Option<&str> {
        self.get(REST_KEY)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.buf.iter().map(|(k, v)| (&**k, v.as_str()))
    }

    pub(crate) fn set(&mut self, name: &str, value: Option<&str>) {
        let pos = self.buf.iter().position(|(k, _)| &**k == name);
        match (pos, value) {
            (Some(i), Some(v)) => self.buf[i].1 = v.to_owned(),
            (Some(i), None) => {
                self.buf.remove(i);
            }
            (None, Some(v)) => self.buf.push((name.into(), v.to_owned())),
            (None, None) => {}
        }
    }
}

impl Deref for Params {
    type Target = [(Box<str>, String)];
    fn deref(&self) -> &Self::Target {
        &self.buf
    }
}

impl IntoIterator for Params {
    type Item = (Box<str>, String);
    type IntoIter = smallvec::IntoIter<[(Box<str>, String); 4]>;
    fn into_iter(self) -> Self::IntoIter {
        self.buf.into_iter()
    }
}
