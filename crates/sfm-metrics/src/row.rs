//! Plain data row types collected by [`MetricsObserver`](crate::MetricsObserver).

/// Inner-circle statistics at one sample time.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DensitySampleRow {
    /// Step whose end triggered the sample.
    pub step:            u64,
    /// Nominal sample time, a multiple of the sample interval.
    pub time_secs:       f64,
    /// Agents inside the inner circle.
    pub inside:          usize,
    /// `inside` per square metre of the inner circle.
    pub density_per_m2:  f64,
    /// Mean time the agents currently inside have spent there; `0.0` when
    /// the circle is empty.
    pub mean_dwell_secs: f64,
}

/// One agent reaching its target.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArrivalRow {
    pub agent_id:           u32,
    pub step:               u64,
    pub time_secs:          f64,
    /// Speed at the moment of arrival, m/s.
    pub speed:              f64,
    /// Path length walked, distance units.
    pub total_displacement: f64,
}

/// One agent's position at a sample time.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrajectoryRow {
    pub agent_id:  u32,
    pub time_secs: f64,
    pub x:         f64,
    pub y:         f64,
    pub arrived:   bool,
}
