use crate::elements::ElementId;

/// Dense (a, b) -> T lookup, `stride x stride` slots
#[derive(Clone, Debug)]
pub struct PairTable<T> {
    stride: usize,
    slots: Vec<Option<T>>,
}

impl<T: Copy> PairTable<T> {
    pub fn new(element_count: usize) -> Self {
        Self {
            stride: element_count,
            slots: vec![None; element_count * element_count],
        }
    }

    #[inline]
    fn index(&self, a: ElementId, b: ElementId) -> Option<usize> {
        let (a, b) = (a as usize, b as usize);
        if a < self.stride && b < self.stride {
            Some(a * self.stride + b)
        } else {
            None
        }
    }

    #[inline]
    pub fn get(&self, a: ElementId, b: ElementId) -> Option<&T> {
        let idx = self.index(a, b)?;
        self.slots[idx].as_ref()
    }

    /// Out-of-range ids are ignored
    pub fn insert(&mut self, a: ElementId, b: ElementId, value: T) -> Option<T> {
        let idx = self.index(a, b)?;
        self.slots[idx].replace(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ElementId, ElementId, &T)> + '_ {
        let stride = self.stride;
        self.slots.iter().enumerate().filter_map(move |(idx, slot)| {
            slot.as_ref()
                .map(|v| ((idx / stride) as ElementId, (idx % stride) as ElementId, v))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_lookup() {
        let mut t = PairTable::new(4);
        assert_eq!(t.insert(1, 2, 7u32), None);
        assert_eq!(t.get(1, 2), Some(&7));
        assert_eq!(t.get(2, 1), None);
        assert_eq!(t.insert(1, 2, 9), Some(7));
    }

    #[test]
    fn out_of_range_ids_miss() {
        let mut t = PairTable::new(2);
        assert_eq!(t.insert(5, 0, 1u8), None);
        assert_eq!(t.get(5, 0), None);
        assert_eq!(t.iter().count(), 0);
    }

    #[test]
    fn iter_reports_keys() {
        let mut t = PairTable::new(3);
        t.insert(2, 1, 'x');
        let all: Vec<_> = t.iter().collect();
        assert_eq!(all, vec![(2, 1, &'x')]);
    }
}
