//! Swarm state and leader-ranking variants.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the leader set is ranked each generation.
///
/// # Examples
///
/// ```
/// use u_moea::nspso::DiversityMechanism;
///
/// let m: DiversityMechanism = "max min".parse().unwrap();
/// assert_eq!(m, DiversityMechanism::MaxMin);
/// assert_eq!(m.to_string(), "max min");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DiversityMechanism {
    /// Every particle, ordered by non-domination rank then descending
    /// crowding distance.
    #[default]
    CrowdingDistance,

    /// The first non-dominated front, least crowded niche first.
    NicheCount,

    /// Particles with negative MaxMin score, ascending.
    MaxMin,
}

impl fmt::Display for DiversityMechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CrowdingDistance => "crowding distance",
            Self::NicheCount => "niche count",
            Self::MaxMin => "max min",
        };
        f.write_str(name)
    }
}

impl FromStr for DiversityMechanism {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "crowding distance" => Ok(Self::CrowdingDistance),
            "niche count" => Ok(Self::NicheCount),
            "max min" => Ok(Self::MaxMin),
            other => Err(format!("unknown diversity mechanism: {other:?}")),
        }
    }
}

/// One particle of the working swarm.
///
/// The buffer holding these grows to `2N` during a generation (parents
/// followed by their moved copies) and is cut back to `N` by
/// environmental selection.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Particle {
    pub cur_x: Vec<f64>,
    pub best_x: Vec<f64>,
    pub cur_v: Vec<f64>,
    pub cur_f: Vec<f64>,
    pub best_f: Vec<f64>,
}

impl Particle {
    /// A particle whose personal best is its current position.
    pub fn new(x: Vec<f64>, v: Vec<f64>, f: Vec<f64>) -> Self {
        Self {
            best_x: x.clone(),
            cur_x: x,
            cur_v: v,
            best_f: f.clone(),
            cur_f: f,
        }
    }
}
