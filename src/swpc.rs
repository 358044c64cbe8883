//! Rolling GOES feeds published by the Space Weather Prediction Center.

use std::{fmt, str::FromStr};

pub const SWPC_URL: &str = "https://services.swpc.noaa.gov/json/goes/primary";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    Electrons,
    Protons,
    Magnetometers,
    XrayFlares,
    Xrays,
}

impl Feed {
    pub const ALL: [Feed; 5] = [
        Feed::Electrons,
        Feed::Protons,
        Feed::Magnetometers,
        Feed::XrayFlares,
        Feed::Xrays,
    ];

    pub fn remote_name(&self) -> &'static str {
        match self {
            Feed::Electrons => "differential-electrons-7-day.json",
            Feed::Protons => "differential-protons-7-day.json",
            Feed::Magnetometers => "magnetometers-7-day.json",
            Feed::XrayFlares => "xray-flares-7-day.json",
            Feed::Xrays => "xrays-7-day.json",
        }
    }

    /// Name the feed is saved under in the 7-day directory.
    pub fn local_name(&self) -> &'static str {
        match self {
            Feed::Electrons => "electron.json",
            Feed::Protons => "proton.json",
            Feed::Magnetometers => "magnetometers.json",
            Feed::XrayFlares => "xrays-flares.json",
            Feed::Xrays => "xrays.json",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Look-back window of the X-ray flux feed.
pub enum Interval {
    #[default]
    SevenDay,
    ThreeDay,
    OneDay,
    SixHour,
}

impl Interval {
    pub fn key(&self) -> &'static str {
        match self {
            Interval::SevenDay => "7-day",
            Interval::ThreeDay => "3-day",
            Interval::OneDay => "1-day",
            Interval::SixHour => "6-hour",
        }
    }
}

impl FromStr for Interval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "7-day" => Ok(Interval::SevenDay),
            "3-day" => Ok(Interval::ThreeDay),
            "1-day" => Ok(Interval::OneDay),
            "6-hour" => Ok(Interval::SixHour),
            _ => Err(format!(
                "interval must be one of 7-day, 3-day, 1-day, 6-hour (got '{}')",
                s
            )),
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

pub fn feed_url(base: &str, feed: Feed) -> String {
    format!("{}/{}", base.trim_end_matches('/'), feed.remote_name())
}

pub fn xrays_url(base: &str, interval: Interval) -> String {
    format!("{}/xrays-{}.json", base.trim_end_matches('/'), interval.key())
}

// -- Tests -------------------------------------------------------------------
