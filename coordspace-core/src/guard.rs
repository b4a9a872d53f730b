//! Release-on-drop guard for handles that are acquired in several steps.
//!
//! While a multi-part object is being built, each handle already acquired
//! sits in a [`Guard`]. An early return drops the guards and releases the
//! handles. Once every part exists, [`Guard::into_inner`] hands the handles
//! over to the finished object.

pub struct Guard<T, F: FnOnce(T)> {
    inner: Option<(T, F)>,
}

impl<T, F: FnOnce(T)> Guard<T, F> {
    pub fn new(value: T, release: F) -> Self {
        Self {
            inner: Some((value, release)),
        }
    }

    pub fn get(&self) -> &T {
        match &self.inner {
            Some((value, _)) => value,
            None => unreachable!("guard is only emptied by drop or into_inner"),
        }
    }

    /// Keeps the value and skips the release.
    pub fn into_inner(mut self) -> T {
        match self.inner.take() {
            Some((value, _)) => value,
            None => unreachable!("guard is only emptied by drop or into_inner"),
        }
    }
}

impl<T, F: FnOnce(T)> Drop for Guard<T, F> {
    fn drop(&mut self) {
        if let Some((value, release)) = self.inner.take() {
            release(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    fn build(released: &RefCell<Vec<u32>>, fail_at: Option<u32>) -> Result<(u32, u32, u32), String> {
        let acquire = |id: u32| {
            if fail_at == Some(id) {
                Err(format!("out of handles at {}", id))
            } else {
                Ok(id)
            }
        };
        let release = |id: u32| released.borrow_mut().push(id);

        let a = Guard::new(acquire(1)?, release);
        let b = Guard::new(acquire(2)?, release);
        let c = acquire(3)?;
        assert_eq!((*a.get(), *b.get()), (1, 2));
        Ok((a.into_inner(), b.into_inner(), c))
    }

    #[test]
    fn test_failure_releases_earlier_handles_once() {
        let released = RefCell::new(Vec::new());
        assert!(build(&released, Some(3)).is_err());
        // Locals drop in reverse order.
        assert_eq!(*released.borrow(), vec![2, 1]);

        released.borrow_mut().clear();
        assert!(build(&released, Some(2)).is_err());
        assert_eq!(*released.borrow(), vec![1]);
    }

    #[test]
    fn test_success_releases_nothing() {
        let released = RefCell::new(Vec::new());
        assert_eq!(build(&released, None), Ok((1, 2, 3)));
        assert!(released.borrow().is_empty());
    }
}
