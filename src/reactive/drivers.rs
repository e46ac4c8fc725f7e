//! Named effect parameters driven by individual bands.

use std::collections::BTreeMap;

use super::{value_at, Reaction};
use crate::params::EffectDriver;

/// Produces `name → value * strength` for each configured driver
#[derive(Debug, Clone, Default)]
pub struct ParameterDriver {
    drivers: Vec<EffectDriver>,
    values: BTreeMap<String, f32>,
}

impl ParameterDriver {
    pub fn new(drivers: Vec<EffectDriver>) -> Self {
        let values = drivers.iter().map(|d| (d.name.clone(), 0.0)).collect();
        Self { drivers, values }
    }

    pub fn drivers(&self) -> &[EffectDriver] {
        &self.drivers
    }

    /// Latest value of the parameter `name`
    pub fn value(&self, name: &str) -> Option<f32> {
        self.values.get(name).copied()
    }

    pub fn values(&self) -> &BTreeMap<String, f32> {
        &self.values
    }
}

impl Reaction for ParameterDriver {
    fn react(&mut self, data: &[f32]) {
        for driver in &self.drivers {
            let value = value_at(data, driver.target_band) * driver.strength;
            self.values.insert(driver.name.clone(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drivers_scale_their_band() {
        let mut driver = ParameterDriver::new(vec![
            EffectDriver::new("rate", 0, 100.0),
            EffectDriver::new("size", 2, 0.5),
        ]);
        assert_eq!(driver.value("rate"), Some(0.0));

        driver.react(&[0.25, 1.0, 4.0]);

        assert_eq!(driver.value("rate"), Some(25.0));
        assert_eq!(driver.value("size"), Some(2.0));
        assert_eq!(driver.value("speed"), None);
    }

    #[test]
    fn test_missing_band_reads_zero() {
        let mut driver = ParameterDriver::new(vec![EffectDriver::new("rate", 5, 10.0)]);

        driver.react(&[1.0, 1.0]);

        assert_eq!(driver.value("rate"), Some(0.0));
        assert_eq!(driver.values().len(), 1);
    }
}
