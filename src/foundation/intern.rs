use std::collections::HashMap;

use crate::foundation::ids::LinkIdx;

/// Interns linking ids in first-seen order.
#[derive(Debug, Default)]
pub(crate) struct LinkInterner {
    ids_by_str: HashMap<String, LinkIdx>,
    strs_by_id: Vec<String>,
}

impl LinkInterner {
    pub(crate) fn intern(&mut self, s: &str) -> LinkIdx {
        if let Some(&id) = self.ids_by_str.get(s) {
            return id;
        }
        let id = LinkIdx(u32::try_from(self.strs_by_id.len()).unwrap_or(u32::MAX));
        self.strs_by_id.push(s.to_owned());
        self.ids_by_str.insert(s.to_owned(), id);
        id
    }

    pub(crate) fn get(&self, id: LinkIdx) -> &str {
        self.strs_by_id
            .get(id.0 as usize)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub(crate) fn len(&self) -> usize {
        self.strs_by_id.len()
    }
}
