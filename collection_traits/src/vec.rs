use crate::{Collection, CollectionError, Result, Sequence};

impl<T: PartialEq> Collection for Vec<T> {
    type Item = T;

    fn contains(&self, item: &T) -> bool {
        self.as_slice().contains(item)
    }

    fn add(&mut self, item: T) -> Result<bool> {
        self.push(item);
        Ok(true)
    }

    fn remove_item(&mut self, item: &T) -> Result<bool> {
        match self.iter().position(|x| x == item) {
            Some(idx) => {
                self.remove(idx);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn remove_where(&mut self, mut predicate: impl FnMut(&T) -> bool) -> Result<usize> {
        let before = self.len();
        self.retain(|x| !predicate(x));
        Ok(before - self.len())
    }

    fn clear(&mut self) -> Result<()> {
        Vec::clear(self);
        Ok(())
    }

    fn for_each_item(&self, f: impl FnMut(&T)) {
        self.iter().for_each(f)
    }
}

impl<T: PartialEq> Sequence for Vec<T> {
    fn get(&self, index: usize) -> Result<&T> {
        self.as_slice()
            .get(index)
            .ok_or_else(|| CollectionError::out_of_range(index, self.len()))
    }

    fn set(&mut self, index: usize, item: T) -> Result<T> {
        let len = self.len();
        let slot = self
            .as_mut_slice()
            .get_mut(index)
            .ok_or_else(|| CollectionError::out_of_range(index, len))?;
        Ok(std::mem::replace(slot, item))
    }

    fn insert_at(&mut self, index: usize, item: T) -> Result<()> {
        if index > self.len() {
            return Err(CollectionError::out_of_range(index, self.len()));
        }
        self.insert(index, item);
        Ok(())
    }

    fn remove_at(&mut self, index: usize) -> Result<T> {
        if index >= self.len() {
            return Err(CollectionError::out_of_range(index, self.len()));
        }
        Ok(self.remove(index))
    }

    fn index_of(&self, item: &T) -> Option<usize> {
        self.iter().position(|x| x == item)
    }

    fn last_index_of(&self, item: &T) -> Option<usize> {
        self.iter().rposition(|x| x == item)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Collection, CollectionError, HasLength, Sequence};
    use rstest::rstest;

    #[test]
    fn bulk_operations() {
        let mut fruits = vec!["Apple", "Banana", "Cherry"];
        Collection::add_all(&mut fruits, ["Mango", "Orange"]).unwrap();
        assert_eq!(HasLength::len(&fruits), 5);

        assert!(fruits.remove_item(&"Banana").unwrap());
        assert!(!fruits.remove_item(&"Banana").unwrap());

        assert!(fruits.remove_all(&["Mango", "Apple"]).unwrap());
        assert_eq!(fruits, vec!["Cherry", "Orange"]);

        assert_eq!(fruits.remove_where(|f| f.starts_with('O')).unwrap(), 1);
        assert_eq!(fruits, vec!["Cherry"]);
        assert!(fruits.contains_all(&["Cherry"]));
    }

    #[rstest]
    #[case(0, Ok("a"))]
    #[case(2, Ok("c"))]
    #[case(3, Err(CollectionError::out_of_range(3, 3)))]
    fn positional_get(#[case] index: usize, #[case] expected: Result<&str, CollectionError>) {
        let items = vec!["a", "b", "c"];
        assert_eq!(Sequence::get(&items, index).copied(), expected);
    }

    #[test]
    fn insert_at_end_appends() {
        let mut items = vec![1, 2];
        items.insert_at(2, 3).unwrap();
        assert_eq!(items, vec![1, 2, 3]);
        assert_eq!(
            items.insert_at(5, 4),
            Err(CollectionError::out_of_range(5, 3))
        );
    }

    #[test]
    fn first_and_last_index() {
        let items = vec!["Apple", "Banana", "Orange", "Banana"];
        assert_eq!(items.index_of(&"Banana"), Some(1));
        assert_eq!(items.last_index_of(&"Banana"), Some(3));
        assert_eq!(items.index_of(&"Kiwi"), None);
    }
}
