//! Notebook dependency installer.
//!
//! The workshop notebooks need a handful of scientific packages plus the
//! `bermuda-ledger` wheel. How they get installed depends on where the kernel
//! runs, and that choice is passed in explicitly as a [`Runtime`]:
//!
//! - [`Runtime::Browser`]: a package-fetch facility is available (micropip in
//!   Pyodide). The plan's package list is fetched, then the pinned wheel URL,
//!   one after the other. A failed fetch is returned as an error; there is no
//!   retry.
//! - [`Runtime::Native`]: a regular interpreter. Nothing is installed; the
//!   target module is imported and, if missing, the caller gets a manual
//!   install instruction instead of an error.
//!
//! The CLI drives the same code with [`PipFetcher`] and [`PythonImporter`], which
//! shell out to a local Python.

use std::fmt;
use std::future::Future;
use std::io;
use std::path::PathBuf;
use std::process::Command;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Wheel for the workshop's ledger library, pinned to the version the notebooks target.
pub const BERMUDA_WHEEL_URL: &str = "https://raw.githubusercontent.com/LedgerInvesting/bermuda-clrs-workshop-2025/jupyterlite-setup/wheels/bermuda_ledger-2.1.15-py3-none-any.whl";

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },
    #[error("{0}")]
    Rejected(String),
}

#[derive(Error, Debug)]
pub enum ImportCheckError {
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("module {module} is not importable")]
    Missing { module: String },
}

#[derive(Error, Debug)]
pub enum InstallError {
    #[error("fetching {request} failed: {source}")]
    Fetch {
        request: String,
        #[source]
        source: FetchError,
    },
}

/// One call into the package-fetch facility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    /// Package names resolved by the facility's index.
    Packages(Vec<String>),
    /// A wheel addressed directly by URL.
    Url(String),
}

impl fmt::Display for FetchRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchRequest::Packages(names) => write!(f, "{}", names.join(", ")),
            FetchRequest::Url(url) => write!(f, "{url}"),
        }
    }
}

/// An asynchronous package installer provided by the runtime.
pub trait PackageFetcher {
    fn fetch(&self, request: FetchRequest) -> impl Future<Output = Result<(), FetchError>>;
}

/// Checks whether a module can be imported.
pub trait ModuleImporter {
    fn import(&self, module: &str) -> Result<(), ImportCheckError>;
}

/// Where the notebook kernel runs, with the capability that comes with it.
#[derive(Debug)]
pub enum Runtime<F, P> {
    Browser(F),
    Native(P),
}

/// What to install and how to tell the user to do it by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPlan {
    pub packages: Vec<String>,
    pub wheel_url: String,
    /// Module imported in a native runtime.
    pub import_name: String,
    /// Distribution name in the manual instruction.
    pub pip_name: String,
}

impl Default for InstallPlan {
    fn default() -> Self {
        Self {
            packages: ["numpy", "pandas", "altair", "matplotlib"]
                .into_iter()
                .map(String::from)
                .collect(),
            wheel_url: BERMUDA_WHEEL_URL.to_string(),
            import_name: "bermuda".to_string(),
            pip_name: "bermuda-ledger".to_string(),
        }
    }
}

impl InstallPlan {
    /// Fetch requests in the order they are issued.
    pub fn requests(&self) -> Vec<FetchRequest> {
        vec![
            FetchRequest::Packages(self.packages.clone()),
            FetchRequest::Url(self.wheel_url.clone()),
        ]
    }

    /// Notebook-cell command for installing the library by hand.
    pub fn manual_instruction(&self) -> String {
        format!("Run: !pip install {}", self.pip_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// Every request in the plan was fetched.
    Fetched { requests: usize },
    /// Native runtime; the module already imports.
    AlreadyAvailable,
    /// Native runtime; the module is missing and must be installed by hand.
    ManualInstallRequired { instruction: String },
}

/// Install the plan's dependencies using the runtime's capability.
pub async fn install<F, P>(
    runtime: &Runtime<F, P>,
    plan: &InstallPlan,
) -> Result<InstallOutcome, InstallError>
where
    F: PackageFetcher,
    P: ModuleImporter,
{
    match runtime {
        Runtime::Browser(fetcher) => {
            let requests = plan.requests();
            for request in &requests {
                info!(%request, "fetching packages");
                fetcher
                    .fetch(request.clone())
                    .await
                    .map_err(|source| InstallError::Fetch {
                        request: request.to_string(),
                        source,
                    })?;
            }
            Ok(InstallOutcome::Fetched {
                requests: requests.len(),
            })
        }
        Runtime::Native(importer) => match importer.import(&plan.import_name) {
            Ok(()) => {
                debug!(module = %plan.import_name, "module already importable");
                Ok(InstallOutcome::AlreadyAvailable)
            }
            Err(err) => {
                warn!(module = %plan.import_name, error = %err, "import failed");
                Ok(InstallOutcome::ManualInstallRequired {
                    instruction: plan.manual_instruction(),
                })
            }
        },
    }
}

// ============================================================================
// Local Python strategies
// ============================================================================

/// Installs through `python -m pip install`.
#[derive(Debug, Clone)]
pub struct PipFetcher {
    pub python: PathBuf,
}

impl PackageFetcher for PipFetcher {
    async fn fetch(&self, request: FetchRequest) -> Result<(), FetchError> {
        let program = self.python.display().to_string();
        let mut command = Command::new(&self.python);
        command.args(["-m", "pip", "install"]);
        match &request {
            FetchRequest::Packages(names) => command.args(names),
            FetchRequest::Url(url) => command.arg(url),
        };

        let output = command.output().map_err(|source| FetchError::Spawn {
            program: program.clone(),
            source,
        })?;
        if output.status.success() {
            Ok(())
        } else {
            Err(FetchError::Failed {
                program,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

/// Checks with `python -c "import <module>"`.
#[derive(Debug, Clone)]
pub struct PythonImporter {
    pub python: PathBuf,
}

impl ModuleImporter for PythonImporter {
    fn import(&self, module: &str) -> Result<(), ImportCheckError> {
        let status = Command::new(&self.python)
            .args(["-c", &format!("import {module}")])
            .output()
            .map_err(|source| ImportCheckError::Spawn {
                program: self.python.display().to_string(),
                source,
            })?
            .status;
        if status.success() {
            Ok(())
        } else {
            Err(ImportCheckError::Missing {
                module: module.to_string(),
            })
        }
    }
}
