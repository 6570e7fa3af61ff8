/// Threshold rules for the dashboard badges
///
/// Pure functions of the latest reading; the poller stores their results in
/// the view model and the view only turns them into text.
use std::fmt;

use crate::api::EnvironmentControl;

/// Lowest comfortable bedroom temperature (°C)
pub const TEMP_MIN: f64 = 17.0;
/// Highest comfortable bedroom temperature (°C)
pub const TEMP_MAX: f64 = 24.0;
/// Brightest comfortable light level (%)
pub const LIGHT_MAX: f64 = 30.0;
/// Below this the room is reported as very dark (%)
pub const LIGHT_DARK: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureStatus {
    TooCold,
    TooHot,
    Optimal,
}

impl TemperatureStatus {
    pub fn classify(temperature: f64) -> Self {
        if temperature < TEMP_MIN {
            TemperatureStatus::TooCold
        } else if temperature > TEMP_MAX {
            TemperatureStatus::TooHot
        } else {
            TemperatureStatus::Optimal
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TemperatureStatus::TooCold => "Too Cold",
            TemperatureStatus::TooHot => "Too Hot",
            TemperatureStatus::Optimal => "Optimal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightStatus {
    TooBright,
    VeryDark,
    Optimal,
}

impl LightStatus {
    pub fn classify(light: f64) -> Self {
        if light > LIGHT_MAX {
            LightStatus::TooBright
        } else if light < LIGHT_DARK {
            LightStatus::VeryDark
        } else {
            LightStatus::Optimal
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LightStatus::TooBright => "Too Bright",
            LightStatus::VeryDark => "Very Dark",
            LightStatus::Optimal => "Optimal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupancy {
    InBed,
    NotInBed,
}

impl Occupancy {
    /// Bed is occupied when the pressure is strictly above `threshold`
    pub fn from_pressure(pressure: f64, threshold: f64) -> Self {
        if pressure > threshold {
            Occupancy::InBed
        } else {
            Occupancy::NotInBed
        }
    }

    pub fn is_in_bed(&self) -> bool {
        matches!(self, Occupancy::InBed)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Occupancy::InBed => "In Bed",
            Occupancy::NotInBed => "Not in Bed",
        }
    }

    pub fn badge(&self) -> &'static str {
        match self {
            Occupancy::InBed => "Sleeping",
            Occupancy::NotInBed => "Awake",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvironmentStatus {
    Optimal,
    Suboptimal,
    Poor,
}

impl EnvironmentStatus {
    pub fn classify(temperature: f64, light: f64) -> Self {
        let temp_ok = (TEMP_MIN..=TEMP_MAX).contains(&temperature);
        let light_ok = light <= LIGHT_MAX;

        if temp_ok && light_ok {
            EnvironmentStatus::Optimal
        } else if !temp_ok && !light_ok {
            EnvironmentStatus::Poor
        } else {
            EnvironmentStatus::Suboptimal
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EnvironmentStatus::Optimal => "Optimal",
            EnvironmentStatus::Suboptimal => "Suboptimal",
            EnvironmentStatus::Poor => "Poor",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureControlStatus {
    Disabled,
    Heating,
    Cooling,
    Maintained,
}

impl TemperatureControlStatus {
    pub fn from_control(control: &EnvironmentControl) -> Self {
        if !control.auto_temp {
            TemperatureControlStatus::Disabled
        } else if control.temp_adjust > 0.0 {
            TemperatureControlStatus::Heating
        } else if control.temp_adjust < 0.0 {
            TemperatureControlStatus::Cooling
        } else {
            TemperatureControlStatus::Maintained
        }
    }
}

impl fmt::Display for TemperatureControlStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemperatureControlStatus::Disabled => write!(f, "Auto-temperature disabled"),
            TemperatureControlStatus::Heating => write!(f, "Heating active"),
            TemperatureControlStatus::Cooling => write!(f, "Cooling active"),
            TemperatureControlStatus::Maintained => write!(f, "Temperature maintained"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightControlStatus {
    Disabled,
    Increasing,
    Decreasing,
    Maintained,
}

impl LightControlStatus {
    pub fn from_control(control: &EnvironmentControl) -> Self {
        if !control.adaptive_light {
            LightControlStatus::Disabled
        } else if control.light_adjust > 0.0 {
            LightControlStatus::Increasing
        } else if control.light_adjust < 0.0 {
            LightControlStatus::Decreasing
        } else {
            LightControlStatus::Maintained
        }
    }
}

impl fmt::Display for LightControlStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LightControlStatus::Disabled => write!(f, "Adaptive lighting disabled"),
            LightControlStatus::Increasing => write!(f, "Increasing brightness"),
            LightControlStatus::Decreasing => write!(f, "Decreasing brightness"),
            LightControlStatus::Maintained => write!(f, "Light level maintained"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_boundaries() {
        assert_eq!(TemperatureStatus::classify(16.9), TemperatureStatus::TooCold);
        assert_eq!(TemperatureStatus::classify(17.0), TemperatureStatus::Optimal);
        assert_eq!(TemperatureStatus::classify(24.0), TemperatureStatus::Optimal);
        assert_eq!(TemperatureStatus::classify(24.1), TemperatureStatus::TooHot);
    }

    #[test]
    fn test_temperature_sweep() {
        let mut t = -10.0;
        while t <= 40.0 {
            let expected = if t < 17.0 {
                "Too Cold"
            } else if t > 24.0 {
                "Too Hot"
            } else {
                "Optimal"
            };
            assert_eq!(TemperatureStatus::classify(t).label(), expected, "t = {}", t);
            t += 0.25;
        }
    }

    #[test]
    fn test_light_boundaries() {
        assert_eq!(LightStatus::classify(30.0), LightStatus::Optimal);
        assert_eq!(LightStatus::classify(30.5), LightStatus::TooBright);
        assert_eq!(LightStatus::classify(5.0), LightStatus::Optimal);
        assert_eq!(LightStatus::classify(4.9), LightStatus::VeryDark);
    }

    #[test]
    fn test_environment_status() {
        assert_eq!(EnvironmentStatus::classify(20.0, 10.0), EnvironmentStatus::Optimal);
        assert_eq!(EnvironmentStatus::classify(17.0, 30.0), EnvironmentStatus::Optimal);
        assert_eq!(EnvironmentStatus::classify(10.0, 80.0), EnvironmentStatus::Poor);
        assert_eq!(EnvironmentStatus::classify(30.0, 31.0), EnvironmentStatus::Poor);
        assert_eq!(EnvironmentStatus::classify(20.0, 45.0), EnvironmentStatus::Suboptimal);
        assert_eq!(EnvironmentStatus::classify(12.0, 5.0), EnvironmentStatus::Suboptimal);
    }

    #[test]
    fn test_occupancy_threshold() {
        assert_eq!(Occupancy::from_pressure(0.0, 0.0), Occupancy::NotInBed);
        assert_eq!(Occupancy::from_pressure(0.5, 0.0), Occupancy::InBed);
        assert_eq!(Occupancy::from_pressure(10.0, 10.0), Occupancy::NotInBed);
        assert_eq!(Occupancy::InBed.label(), "In Bed");
        assert_eq!(Occupancy::NotInBed.badge(), "Awake");
    }

    #[test]
    fn test_control_status() {
        let mut control = EnvironmentControl {
            auto_temp: true,
            temp_adjust: 1.5,
            adaptive_light: true,
            light_adjust: -2.0,
        };
        assert_eq!(
            TemperatureControlStatus::from_control(&control),
            TemperatureControlStatus::Heating
        );
        assert_eq!(
            LightControlStatus::from_control(&control).to_string(),
            "Decreasing brightness"
        );

        control.temp_adjust = 0.0;
        control.adaptive_light = false;
        assert_eq!(
            TemperatureControlStatus::from_control(&control).to_string(),
            "Temperature maintained"
        );
        assert_eq!(
            LightControlStatus::from_control(&control),
            LightControlStatus::Disabled
        );

        control.auto_temp = false;
        assert_eq!(
            TemperatureControlStatus::from_control(&control).to_string(),
            "Auto-temperature disabled"
        );
    }
}
