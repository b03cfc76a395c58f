// Threshold-based observations shown under the external-factor figures.
use crate::reports::ExternalFactors;

/// Average temperature above which warm-weather demand is called out (°C).
pub const WARM_TEMPERATURE: f64 = 25.0;
/// Average rainfall above which rain is called out as a drag on visits (mm).
pub const HEAVY_RAINFALL: f64 = 50.0;

/// One observation per factor: holidays, temperature, rainfall.
///
/// An undefined mean never satisfies a comparison, so it always selects the
/// second message of each pair.
pub fn observations(x: &ExternalFactors) -> Vec<&'static str> {
    let holidays_higher = matches!(
        (x.holiday_sales, x.non_holiday_sales),
        (Some(h), Some(n)) if h > n
    );
    let warm = x.avg_temperature.is_some_and(|t| t > WARM_TEMPERATURE);
    let rainy = x.avg_rainfall.is_some_and(|r| r > HEAVY_RAINFALL);

    vec![
        if holidays_higher {
            "Sales are higher on holidays compared to regular days."
        } else {
            "Sales are relatively stable or lower on holidays compared to regular days."
        },
        if warm {
            "Higher temperatures correlate with increased sales of seasonal products."
        } else {
            "Cooler temperatures might indicate lower sales activity in certain regions."
        },
        if rainy {
            "Rainy weather could negatively impact store visits and sales."
        } else {
            "Minimal rainfall seems to have a neutral or positive impact on sales."
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::CorrelationMatrix;

    fn factors(
        holiday: Option<f64>,
        regular: Option<f64>,
        temp: Option<f64>,
        rain: Option<f64>,
    ) -> ExternalFactors {
        ExternalFactors {
            preview: Vec::new(),
            correlation: CorrelationMatrix {
                values: [[None; 4]; 4],
            },
            avg_temperature: temp,
            avg_rainfall: rain,
            holiday_sales: holiday,
            non_holiday_sales: regular,
        }
    }

    #[test]
    fn all_thresholds_exceeded() {
        let obs = observations(&factors(Some(200.0), Some(100.0), Some(30.0), Some(60.0)));
        assert!(obs[0].starts_with("Sales are higher on holidays"));
        assert!(obs[1].starts_with("Higher temperatures"));
        assert!(obs[2].starts_with("Rainy weather"));
    }

    #[test]
    fn thresholds_are_strict() {
        let obs = observations(&factors(Some(100.0), Some(100.0), Some(25.0), Some(50.0)));
        assert!(obs[0].starts_with("Sales are relatively stable"));
        assert!(obs[1].starts_with("Cooler temperatures"));
        assert!(obs[2].starts_with("Minimal rainfall"));
    }

    #[test]
    fn undefined_means_fall_to_second_message() {
        let obs = observations(&factors(Some(100.0), None, None, None));
        assert!(obs[0].starts_with("Sales are relatively stable"));
        assert!(obs[1].starts_with("Cooler temperatures"));
        assert!(obs[2].starts_with("Minimal rainfall"));
    }
}
