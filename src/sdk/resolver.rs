//! SDK version-constraint resolution.

use std::path::{PathBuf, MAIN_SEPARATOR};

use crate::error::{Result, ScoutError};
use crate::sdk::probe::{SdkProbe, PLATFORM};
use crate::sdk::symlink;
use crate::sdk::version::SdkVersion;

/// The caller's version-matching policy.
#[derive(Debug, Clone)]
pub enum Constraint {
    /// Use the currently-active default SDK.
    Default,
    /// Require this exact version.
    Exact(SdkVersion),
    /// Require at least this version, preferring the closest match.
    Minimum(SdkVersion),
    /// Validate a known SDK path.
    ExplicitPath(PathBuf),
}

/// A resolution request: the governing constraint plus an optional minimum
/// the final result is re-validated against regardless of which branch
/// produced it.
#[derive(Debug, Clone)]
pub struct ResolveRequest {
    pub constraint: Constraint,
    pub minimum: Option<SdkVersion>,
}

impl ResolveRequest {
    /// A request governed by `constraint` alone.
    pub fn new(constraint: Constraint) -> Self {
        Self {
            constraint,
            minimum: None,
        }
    }
}

/// A successfully resolved SDK.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub version: SdkVersion,
    /// Path with trailing separators stripped. An empty string is a valid
    /// result meaning "no sysroot override".
    pub path: String,
}

/// Resolves an SDK satisfying a [`ResolveRequest`] against an [`SdkProbe`].
pub struct SdkResolver<'a> {
    probe: &'a dyn SdkProbe,
}

impl<'a> SdkResolver<'a> {
    pub fn new(probe: &'a dyn SdkProbe) -> Self {
        Self { probe }
    }

    /// Resolve the request to a `(version, path)` pair.
    pub fn resolve(&self, request: &ResolveRequest) -> Result<Resolution> {
        let (version, path) = match &request.constraint {
            Constraint::Default => {
                (self.probe.sdk_version(None)?, self.probe.sdk_path(None)?)
            }
            Constraint::Exact(wanted) => {
                let identifier = format!("{PLATFORM}{wanted}");
                (
                    self.probe.sdk_version(Some(&identifier))?,
                    self.probe.sdk_path(Some(&identifier))?,
                )
            }
            Constraint::Minimum(minimum) => self.find_with_minimum(minimum)?,
            Constraint::ExplicitPath(given) => {
                // The version probe does not follow a symlinked SDK path.
                let real = symlink::resolve(given)?;
                let version = self.probe.sdk_version(Some(&real.to_string_lossy()))?;
                (version, given.to_string_lossy().into_owned())
            }
        };

        // These checks may be redundant depending on how the SDK was chosen.
        self.check_criteria(request, &version, &path)?;

        tracing::debug!(version = %version, path = %path, "resolved SDK");
        Ok(Resolution {
            version,
            path: trim_trailing_separators(&path),
        })
    }

    /// Enumerate installed SDKs and keep the one closest to `minimum`.
    ///
    /// The smallest satisfying version wins, not the newest: selecting a
    /// newer SDK than required would let builds silently depend on features
    /// the stated minimum does not guarantee.
    fn find_with_minimum(&self, minimum: &SdkVersion) -> Result<(SdkVersion, String)> {
        match self.probe.installed_sdk_versions() {
            Ok(listed) => {
                let mut satisfying = Vec::new();
                for raw in listed {
                    let candidate: SdkVersion = raw.parse()?;
                    if candidate >= *minimum {
                        satisfying.push(candidate);
                    }
                }
                let Some(best) = satisfying.into_iter().min() else {
                    return Err(ScoutError::SdkNotFound {
                        minimum: minimum.to_string(),
                    });
                };
                let identifier = format!("{PLATFORM}{best}");
                let path = self.probe.sdk_path(Some(&identifier))?;
                Ok((best, path))
            }
            Err(listing_err) => {
                // The listing tool may not be installed; the default SDK is
                // then the only candidate.
                tracing::debug!(error = %listing_err, "SDK listing unavailable, checking default SDK");
                let path = self.probe.sdk_path(None)?;
                let version = self.probe.sdk_version(None)?;
                if version < *minimum {
                    return Err(ScoutError::CriteriaNotMet {
                        exact: None,
                        minimum: Some(minimum.to_string()),
                        path: None,
                        sdk_path: path,
                        sdk_version: version.to_string(),
                    });
                }
                Ok((version, path))
            }
        }
    }

    fn check_criteria(
        &self,
        request: &ResolveRequest,
        version: &SdkVersion,
        path: &str,
    ) -> Result<()> {
        let exact = match &request.constraint {
            Constraint::Exact(wanted) => Some(wanted),
            _ => None,
        };
        let exact_miss = exact.is_some_and(|wanted| version != wanted);
        let minimum_miss = request
            .minimum
            .as_ref()
            .is_some_and(|minimum| version < minimum);
        if exact_miss || minimum_miss {
            let given_path = match &request.constraint {
                Constraint::ExplicitPath(given) => {
                    Some(given.to_string_lossy().into_owned())
                }
                _ => None,
            };
            return Err(ScoutError::CriteriaNotMet {
                exact: exact.map(ToString::to_string),
                minimum: request.minimum.as_ref().map(ToString::to_string),
                path: given_path,
                sdk_path: path.to_string(),
                sdk_version: version.to_string(),
            });
        }
        Ok(())
    }
}

/// Nobody wants trailing separators. This is true even if the filesystem
/// root is the SDK: the empty string is then interpreted as "no sysroot".
fn trim_trailing_separators(path: &str) -> String {
    path.trim_end_matches(MAIN_SEPARATOR).to_string()
}
