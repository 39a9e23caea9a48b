use rand::seq::index;
use rand::Rng;
use rand_distr::{Bernoulli, Distribution};

use crate::data::{dataset::Dataset, example::Example};
use crate::error::{NetError, Result};

/// Draws `samples` XOR rows with uniformly random bits and then flips the
/// label of exactly `floor(noise * samples)` distinct rows.
///
/// `noise` must lie in `[0, 1]`; with `noise == 1.0` every label is flipped
/// and the dataset encodes XNOR.
pub fn generate_xor<R: Rng + ?Sized>(samples: usize, noise: f64, rng: &mut R) -> Result<Dataset> {
    if samples == 0 {
        return Err(NetError::invalid("cannot generate an empty dataset"));
    }
    if !(0.0..=1.0).contains(&noise) {
        return Err(NetError::invalid(format!("noise must be within [0, 1], got {noise}")));
    }

    let coin = Bernoulli::new(0.5).map_err(|e| NetError::invalid(e.to_string()))?;
    let bit = |b: bool| if b { 1.0 } else { 0.0 };

    let mut rows: Vec<(bool, bool, bool)> = (0..samples)
        .map(|_| {
            let x1 = coin.sample(rng);
            let x2 = coin.sample(rng);
            (x1, x2, x1 ^ x2)
        })
        .collect();

    let n_flip = (noise * samples as f64).floor() as usize;
    for idx in index::sample(rng, samples, n_flip.min(samples)) {
        rows[idx].2 = !rows[idx].2;
    }

    let examples = rows.into_iter()
        .map(|(x1, x2, y)| Example::new(vec![bit(x1), bit(x2)], vec![bit(y)]))
        .collect();
    Dataset::new(examples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn mislabeled(data: &Dataset) -> usize {
        data.iter()
            .filter(|e| {
                let x = e.inputs();
                let xor = if x[0] != x[1] { 1.0 } else { 0.0 };
                e.targets()[0] != xor
            })
            .count()
    }

    #[test]
    fn clean_dataset_is_pure_xor() {
        let data = generate_xor(200, 0.0, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(data.len(), 200);
        assert_eq!(data.input_size(), 2);
        assert_eq!(data.output_size(), 1);
        assert_eq!(mislabeled(&data), 0);
    }

    #[test]
    fn flips_exact_share_of_labels() {
        let data = generate_xor(200, 0.25, &mut StdRng::seed_from_u64(2)).unwrap();
        assert_eq!(mislabeled(&data), 50);

        let data = generate_xor(10, 0.99, &mut StdRng::seed_from_u64(2)).unwrap();
        assert_eq!(mislabeled(&data), 9);
    }

    #[test]
    fn full_noise_flips_everything() {
        let data = generate_xor(64, 1.0, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(mislabeled(&data), 64);
    }

    #[test]
    fn same_seed_same_dataset() {
        let a = generate_xor(50, 0.1, &mut StdRng::seed_from_u64(9)).unwrap();
        let b = generate_xor(50, 0.1, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_bad_arguments() {
        let rng = &mut StdRng::seed_from_u64(0);
        assert!(matches!(generate_xor(0, 0.0, rng), Err(NetError::InvalidConfiguration(_))));
        assert!(matches!(generate_xor(10, -0.1, rng), Err(NetError::InvalidConfiguration(_))));
        assert!(matches!(generate_xor(10, 1.5, rng), Err(NetError::InvalidConfiguration(_))));
        assert!(matches!(generate_xor(10, f64::NAN, rng), Err(NetError::InvalidConfiguration(_))));
    }
}
