use crate::error::{ReleaseError, Result};
use std::fmt;
use std::str::FromStr;

/// Release version derived from `git describe --tags --long`
///
/// `build` counts the commits since the nearest tag and `suffix` holds the
/// abbreviated hash of the described commit (empty when unknown).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub bugfix: u32,
    pub build: u32,
    pub suffix: String,
}

/// Which component an increment cascades from
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Increment {
    Major,
    Minor,
    Bugfix,
}

impl Increment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Increment::Major => "major",
            Increment::Minor => "minor",
            Increment::Bugfix => "bugfix",
        }
    }
}

impl FromStr for Increment {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "major" => Ok(Increment::Major),
            "minor" => Ok(Increment::Minor),
            "bugfix" => Ok(Increment::Bugfix),
            other => Err(ReleaseError::invalid_argument(format!(
                "invalid action '{}' - expected major, minor or bugfix",
                other
            ))),
        }
    }
}

impl fmt::Display for Increment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Version {
    /// Create a new version
    pub fn new(major: u32, minor: u32, bugfix: u32, build: u32, suffix: impl Into<String>) -> Self {
        Version {
            major,
            minor,
            bugfix,
            build,
            suffix: suffix.into(),
        }
    }

    /// Parse the output of `git describe --tags --long`
    /// (e.g. "v0.1.2-3-gabcdef" -> Version(0,1,2,3,"abcdef"))
    pub fn parse_describe(output: &str) -> Result<Self> {
        let trimmed = output.trim();
        if trimmed.chars().count() < 5 {
            return Err(ReleaseError::format(format!(
                "'{}' is too short to be a version",
                trimmed
            )));
        }

        let clean = trimmed.strip_prefix('v').unwrap_or(trimmed);

        let parts: Vec<&str> = clean.split('.').collect();
        if parts.len() != 3 {
            return Err(ReleaseError::format(format!(
                "'{}' - expected MAJOR.MINOR.BUGFIX-BUILD-gHASH",
                trimmed
            )));
        }

        let remainder: Vec<&str> = parts[2].split('-').collect();
        if remainder.len() != 3 {
            return Err(ReleaseError::format(format!(
                "'{}' - expected BUGFIX-BUILD-gHASH after the second dot",
                trimmed
            )));
        }

        let major = parse_component("major", parts[0])?;
        let minor = parse_component("minor", parts[1])?;
        let bugfix = parse_component("bugfix", remainder[0])?;
        let build = parse_component("build", remainder[1])?;

        // Drop the single-character object-type prefix ("g" for git).
        let mut hash = remainder[2].chars();
        hash.next();
        let suffix = hash.as_str();
        if suffix.chars().any(char::is_whitespace) {
            return Err(ReleaseError::format(format!(
                "commit hash '{}' contains whitespace",
                suffix
            )));
        }

        Ok(Version::new(major, minor, bugfix, build, suffix))
    }

    /// Apply one increment in place. The suffix is left as parsed.
    ///
    /// A component already at `u32::MAX` is an error and leaves the version
    /// unchanged.
    pub fn increment(&mut self, increment: Increment) -> Result<()> {
        match increment {
            Increment::Major => {
                self.major = bump("major", self.major)?;
                self.minor = 0;
                self.bugfix = 0;
            }
            Increment::Minor => {
                self.minor = bump("minor", self.minor)?;
                self.bugfix = 0;
            }
            Increment::Bugfix => {
                self.bugfix = bump("bugfix", self.bugfix)?;
            }
        }
        self.build = 0;
        Ok(())
    }

    /// Increment by action name, rejecting anything but major/minor/bugfix
    pub fn increment_by_name(&mut self, action: &str) -> Result<()> {
        let increment = action.parse::<Increment>()?;
        self.increment(increment)
    }

    /// `MAJOR.MINOR.BUGFIX`, as written to files, commits and tags
    pub fn short(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.bugfix)
    }

    /// `MAJOR.MINOR.BUGFIX.BUILD[-SUFFIX]`, for diagnostics
    pub fn long(&self) -> String {
        let mut result = format!(
            "{}.{}.{}.{}",
            self.major, self.minor, self.bugfix, self.build
        );
        if !self.suffix.is_empty() {
            result.push('-');
            result.push_str(&self.suffix);
        }
        result
    }
}

fn bump(component: &'static str, value: u32) -> Result<u32> {
    value
        .checked_add(1)
        .ok_or(ReleaseError::Overflow { component, value })
}

fn parse_component(component: &'static str, value: &str) -> Result<u32> {
    value.parse::<u32>().map_err(|_| ReleaseError::Parse {
        component,
        value: value.to_string(),
    })
}

impl FromStr for Version {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse_describe(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.long())
    }
}
