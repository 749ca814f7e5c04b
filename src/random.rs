use rand::{rngs::ThreadRng, Rng};

pub trait GetRandom {
    type Item;

    fn get_random(&self, rng: &mut ThreadRng) -> Option<&'_ Self::Item>;
}

impl<T> GetRandom for [T] {
    type Item = T;

    fn get_random(&self, rng: &mut ThreadRng) -> Option<&'_ Self::Item> {
        if self.is_empty() {
            None
        } else {
            self.get(rng.gen_range(0..self.len()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::GetRandom;

    #[test]
    fn empty_slice_yields_nothing() {
        let rng = &mut rand::thread_rng();
        let empty: [u8; 0] = [];
        assert!(empty.get_random(rng).is_none());
    }

    #[test]
    fn every_pick_comes_from_the_slice() {
        let rng = &mut rand::thread_rng();
        let values = [1, 2, 3];
        for _ in 0..50 {
            assert!(values
                .get_random(rng)
                .is_some_and(|value| values.contains(value)));
        }
    }
}
