//! Ranking transform — turns a year's country list into the ordered set of
//! bars the chart shows.

use super::dataset::CountryRecord;

/// One country's bar: the record plus its length as a fraction of the full
/// bar column.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedBar {
    pub country: CountryRecord,
    pub fraction: f64,
}

/// Sort `countries` by population (descending, stable), keep the first
/// `display_count`, and scale each bar against the largest population in
/// that set so the top bar measures exactly `max_fraction`.
pub fn rank(countries: &[CountryRecord], display_count: usize, max_fraction: f64) -> Vec<RankedBar> {
    let mut sorted: Vec<&CountryRecord> = countries.iter().collect();
    // `sort_by` is stable, so equal populations keep their input order.
    sorted.sort_by(|a, b| b.population.cmp(&a.population));
    sorted.truncate(display_count);

    let max_population = sorted.first().map_or(0, |c| c.population);

    sorted
        .into_iter()
        .map(|country| {
            let fraction = if max_population == 0 {
                0.0
            } else {
                country.population as f64 / max_population as f64 * max_fraction
            };
            RankedBar {
                country: country.clone(),
                fraction,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dataset::tests::country;

    const DEFAULT_MAX_FRACTION: f64 = 0.9;

    fn sample() -> Vec<CountryRecord> {
        vec![
            country("1", "Brazil", 200),
            country("2", "China", 1400),
            country("3", "Japan", 125),
            country("4", "India", 1380),
            country("5", "Nigeria", 200),
            country("6", "Mexico", 126),
        ]
    }

    #[test]
    fn output_is_sorted_and_truncated() {
        for n in 0..10 {
            let bars = rank(&sample(), n, DEFAULT_MAX_FRACTION);
            assert_eq!(bars.len(), n.min(6));
            assert!(bars
                .windows(2)
                .all(|w| w[0].country.population >= w[1].country.population));
        }
    }

    #[test]
    fn top_bar_reaches_the_maximum() {
        let bars = rank(&sample(), 4, DEFAULT_MAX_FRACTION);
        assert_eq!(bars[0].country.name, "China");
        assert_eq!(bars[0].fraction, DEFAULT_MAX_FRACTION);
        assert!(bars[1..].iter().all(|b| b.fraction < DEFAULT_MAX_FRACTION));

        let brazil = bars.iter().find(|b| b.country.name == "Brazil").unwrap();
        assert!((brazil.fraction - 200.0 / 1400.0 * 0.9).abs() < 1e-12);
    }

    #[test]
    fn custom_maximum_is_honoured() {
        let bars = rank(&sample(), 2, 0.5);
        assert_eq!(bars[0].fraction, 0.5);
    }

    #[test]
    fn ties_keep_input_order() {
        let bars = rank(&sample(), 6, DEFAULT_MAX_FRACTION);
        let names: Vec<_> = bars.iter().map(|b| b.country.name.as_str()).collect();
        assert_eq!(names, ["China", "India", "Brazil", "Nigeria", "Mexico", "Japan"]);

        let mut swapped = sample();
        swapped.swap(0, 4);
        let bars = rank(&swapped, 6, DEFAULT_MAX_FRACTION);
        assert_eq!(bars[2].country.name, "Nigeria");
        assert_eq!(bars[3].country.name, "Brazil");
    }

    #[test]
    fn empty_input_yields_no_bars() {
        assert!(rank(&[], 10, DEFAULT_MAX_FRACTION).is_empty());
    }

    #[test]
    fn all_zero_populations_do_not_divide_by_zero() {
        let zeros = vec![country("a", "A", 0), country("b", "B", 0)];
        let bars = rank(&zeros, 10, DEFAULT_MAX_FRACTION);
        assert_eq!(bars.len(), 2);
        assert!(bars.iter().all(|b| b.fraction == 0.0));
    }
}
