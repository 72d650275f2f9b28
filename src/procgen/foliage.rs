//! Foliage proxies scattered around branch tips

use rand::Rng;

use crate::core::types::{DVec3, Result};
use crate::core::Error;
use crate::mesh::FoliageProxy;
use crate::procgen::params::FOLIAGE_JITTER_POOL;
use crate::procgen::uniform;

/// Place `count` foliage proxies around `tip`
///
/// Always draws [`FOLIAGE_JITTER_POOL`] jitter offsets (x, y, z per offset, each in
/// `-spread..spread`) before using the first `count`, so changing `count` never shifts
/// the random stream seen by the rest of the tree.
pub fn scatter_foliage<R: Rng + ?Sized>(
    tip: DVec3,
    count: u32,
    spread: f64,
    size: f64,
    resolution: u32,
    rng: &mut R,
) -> Result<Vec<FoliageProxy>> {
    let count = count as usize;
    if count > FOLIAGE_JITTER_POOL {
        return Err(Error::config(
            "foliage_count",
            format!("must be at most {FOLIAGE_JITTER_POOL}, got {count}"),
        ));
    }

    let mut jitter = [DVec3::ZERO; FOLIAGE_JITTER_POOL];
    for offset in jitter.iter_mut() {
        let x = uniform(rng, -spread, spread);
        let y = uniform(rng, -spread, spread);
        let z = uniform(rng, -spread, spread);
        *offset = DVec3::new(x, y, z);
    }

    Ok(jitter[..count]
        .iter()
        .map(|offset| FoliageProxy {
            center: tip + *offset,
            size,
            resolution,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn test_count_and_attributes() {
        let mut rng = Pcg64::seed_from_u64(7);
        let tip = DVec3::new(1.0, 2.0, 3.0);
        let proxies = scatter_foliage(tip, 5, 0.5, 1.5, 2, &mut rng).unwrap();

        assert_eq!(proxies.len(), 5);
        for proxy in &proxies {
            assert_eq!(proxy.size, 1.5);
            assert_eq!(proxy.resolution, 2);
            let offset = proxy.center - tip;
            assert!(offset.abs().max_element() <= 0.5);
        }
    }

    #[test]
    fn test_zero_spread_stacks_on_tip() {
        let mut rng = Pcg64::seed_from_u64(1);
        let tip = DVec3::new(0.0, 6.0, 0.0);
        for proxy in scatter_foliage(tip, 3, 0.0, 1.0, 0, &mut rng).unwrap() {
            assert_eq!(proxy.center, tip);
        }
    }

    #[test]
    fn test_stream_consumption_independent_of_count() {
        let mut a = Pcg64::seed_from_u64(99);
        let mut b = Pcg64::seed_from_u64(99);

        scatter_foliage(DVec3::ZERO, 1, 2.0, 1.0, 0, &mut a).unwrap();
        scatter_foliage(DVec3::ZERO, 20, 2.0, 1.0, 0, &mut b).unwrap();

        assert_eq!(a.random::<u64>(), b.random::<u64>());
    }

    #[test]
    fn test_prefix_is_shared_between_counts() {
        let scatter = |count| {
            scatter_foliage(DVec3::ZERO, count, 1.0, 1.0, 0, &mut Pcg64::seed_from_u64(3)).unwrap()
        };
        let few = scatter(2);
        let many = scatter(6);
        assert_eq!(few[..], many[..2]);
    }

    #[test]
    fn test_count_above_pool_rejected() {
        let mut rng = Pcg64::seed_from_u64(0);
        let result = scatter_foliage(DVec3::ZERO, 21, 1.0, 1.0, 0, &mut rng);
        assert!(matches!(result, Err(Error::Configuration(_))));
    }
}
