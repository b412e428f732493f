pub struct StatsHelper;

impl StatsHelper {
    pub fn mean(samples: &[f64]) -> Option<f64> {
        if samples.is_empty() {
            return None;
        }
        Some(samples.iter().sum::<f64>() / samples.len() as f64)
    }

    /// Sample standard deviation (n - 1 denominator). Undefined below two samples.
    pub fn sample_std(samples: &[f64]) -> Option<f64> {
        if samples.len() < 2 {
            return None;
        }
        let mean = Self::mean(samples)?;
        let sum_sq: f64 = samples.iter().map(|&v| (v - mean) * (v - mean)).sum();
        Some((sum_sq / (samples.len() - 1) as f64).sqrt())
    }

    /// Mean of the present values, ignoring gaps.
    pub fn mean_present(values: &[Option<f64>]) -> Option<f64> {
        let present: Vec<f64> = values.iter().flatten().copied().collect();
        Self::mean(&present)
    }
}
