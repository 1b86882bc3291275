//! Per-axis filter weights.

/// Source samples covering one destination texel along one axis.
///
/// Sample `i` of [`Weights::weights`] belongs to source coordinate `first + i`.
/// Coordinates may fall outside the source; they are resolved with the axis'
/// address mode when read.
#[derive(Debug, Clone, PartialEq)]
pub struct Weights {
    /// Source coordinate of the first sample.
    pub first: i64,
    /// Blend weight of each sample, summing to 1.
    pub weights: Vec<f32>,
}

impl Weights {
    /// Source coordinates and their weights.
    pub fn iter(&self) -> impl Iterator<Item = (i64, f32)> + '_ {
        self.weights
            .iter()
            .enumerate()
            .map(move |(i, &weight)| (self.first + i as i64, weight))
    }

    /// Source coordinates covered.
    pub fn range(&self) -> core::ops::Range<i64> {
        self.first..self.first + self.weights.len() as i64
    }
}

/// Computes the source samples covering the source interval `[start, end)`.
///
/// Coordinates are in source texels with texel `i` covering `[i, i + 1)`.
/// Footprints at least one texel wide (downsampling or exact alignment) use a
/// box filter weighted by overlap. Narrower footprints (upsampling) linearly
/// interpolate the two texels nearest the footprint's centre.
///
/// # Example
///
/// ```
/// use texel_pipeline_resample::get_weights;
///
/// // 4 -> 2: each destination texel averages two source texels.
/// let weights = get_weights(2.0, 4.0);
/// assert_eq!(weights.range(), 2..4);
/// assert_eq!(weights.weights, [0.5, 0.5]);
/// ```
pub fn get_weights(start: f64, end: f64) -> Weights {
    let width = end - start;
    if width >= 1.0 {
        box_weights(start, end, width)
    } else {
        linear_weights((start + end) * 0.5)
    }
}

fn box_weights(start: f64, end: f64, width: f64) -> Weights {
    let first = start.floor() as i64;
    let last = end.ceil() as i64;
    let mut weights = Vec::with_capacity((last - first) as usize);
    for i in first..last {
        let overlap = end.min((i + 1) as f64) - start.max(i as f64);
        weights.push((overlap / width) as f32);
    }
    trim(first, weights)
}

fn linear_weights(center: f64) -> Weights {
    let position = center - 0.5;
    let first = position.floor();
    let fraction = position - first;
    trim(
        first as i64,
        vec![(1.0 - fraction) as f32, fraction as f32],
    )
}

/// Drops zero weights at either end.
fn trim(mut first: i64, mut weights: Vec<f32>) -> Weights {
    while weights.len() > 1 && weights.last() == Some(&0.0) {
        weights.pop();
    }
    let leading = weights
        .iter()
        .take(weights.len() - 1)
        .take_while(|&&w| w == 0.0)
        .count();
    weights.drain(..leading);
    first += leading as i64;
    Weights { first, weights }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sum(weights: &Weights) -> f32 {
        weights.weights.iter().sum()
    }

    #[test]
    fn exact_alignment_reads_one_texel() {
        let weights = get_weights(3.0, 4.0);
        assert_eq!(weights.range(), 3..4);
        assert_eq!(weights.weights, [1.0]);
    }

    #[test]
    fn box_filter_weights_by_overlap() {
        // 3 source texels into 2: the middle texel is split.
        let weights = get_weights(0.0, 1.5);
        assert_eq!(weights.range(), 0..2);
        assert_eq!(weights.weights, [2.0 / 3.0, 1.0 / 3.0]);

        let weights = get_weights(1.5, 3.0);
        assert_eq!(weights.range(), 1..3);
        assert_eq!(weights.weights, [1.0 / 3.0, 2.0 / 3.0]);
    }

    #[test]
    fn upsampling_interpolates_neighbours() {
        // 2 -> 4: destination texel 1 covers [0.5, 1.0), centre 0.75.
        let weights = get_weights(0.5, 1.0);
        assert_eq!(weights.range(), 0..2);
        assert_eq!(weights.weights, [0.75, 0.25]);

        // Destination texel 0's centre lies left of the first texel centre.
        let weights = get_weights(0.0, 0.5);
        assert_eq!(weights.range(), -1..1);
        assert_eq!(weights.weights, [0.25, 0.75]);
    }

    #[test]
    fn centred_upsample_reads_one_texel() {
        let weights = get_weights(2.25, 2.75);
        assert_eq!(weights.range(), 2..3);
        assert_eq!(weights.weights, [1.0]);
    }

    #[rstest]
    #[case(0.0, 7.0 / 3.0)]
    #[case(1.2, 9.7)]
    #[case(-0.4, 0.1)]
    #[case(5.1, 5.3)]
    fn weights_sum_to_one(#[case] start: f64, #[case] end: f64) {
        let weights = get_weights(start, end);
        assert!((sum(&weights) - 1.0).abs() < 1e-6, "{weights:?}");
        assert!(weights.weights.iter().all(|&w| w > 0.0), "{weights:?}");
    }
}
