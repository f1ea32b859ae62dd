use rand::{seq::SliceRandom, Rng};

/// A discrete distribution over `items`, proportional to unnormalized weights.
///
/// Negative and NaN weights count as 0. When every weight is 0 the cumulative
/// walk never passes the threshold and [`WeightedSampler::draw`] returns the
/// last item, so callers needing uniformity must substitute weights
/// themselves. When some weights are infinite, the draw is uniform over the
/// infinite ones.
#[derive(Debug, Clone)]
pub struct WeightedSampler<T> {
    items: Vec<(T, f64)>,
    total_weight: f64,
}

impl<T> WeightedSampler<T> {
    pub fn new(items: Vec<(T, f64)>) -> Self {
        let items: Vec<(T, f64)> = items
            .into_iter()
            .map(|(item, weight)| (item, if weight > 0.0 { weight } else { 0.0 }))
            .collect();
        let total_weight = items.iter().map(|(_, weight)| weight).sum();
        Self {
            items,
            total_weight,
        }
    }

    pub fn from_weights<I, W>(items: I, weights: W) -> Self
    where
        I: IntoIterator<Item = T>,
        W: IntoIterator<Item = f64>,
    {
        Self::new(items.into_iter().zip(weights).collect())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Draws one item, `None` only when the sampler is empty.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&T> {
        let (last, _) = self.items.last()?;

        if self.total_weight.is_infinite() {
            let unbounded: Vec<&T> = self
                .items
                .iter()
                .filter(|(_, weight)| weight.is_infinite())
                .map(|(item, _)| item)
                .collect();
            return unbounded.choose(rng).copied().or(Some(last));
        }

        let threshold = rng.gen::<f64>() * self.total_weight;
        let mut partial_sum = 0.0;
        for (item, weight) in &self.items {
            partial_sum += weight;
            if partial_sum > threshold {
                return Some(item);
            }
        }
        Some(last)
    }
}
