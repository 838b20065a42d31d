//! The fixed deployment stage sequence.
//!
//! The stage list is a build-time constant, not user-editable: later
//! stages read configuration written by earlier ones, and the remote
//! state store does not tolerate concurrent applies. Order matters.

use std::fmt;

/// One infrastructure deployment unit in the provisioning sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageDescriptor {
    /// Short stage name used in progress output and error messages.
    pub name: &'static str,
    /// Git source the deployable definitions are cloned from.
    pub source: &'static str,
    /// Directory name `git clone` produces under the infra dir.
    pub checkout_dir: &'static str,
    /// Subpath inside the checkout where the IaC engine runs.
    pub working_subpath: &'static str,
    /// Whether the stage needs a node build before the IaC run.
    pub node_build: bool,
    /// Whether the base infra parameters/secrets are published before
    /// this stage's IaC run (true only for the first stage).
    pub publishes_infra_inputs: bool,
}

/// The provisioning sequence, in apply order.
pub const STAGES: &[StageDescriptor] = &[
    StageDescriptor {
        name: "base-infra",
        source: "https://github.com/KaribuLab/titvo-security-scan-infra-aws.git",
        checkout_dir: "titvo-security-scan-infra-aws",
        working_subpath: "prod/us-east-1",
        node_build: false,
        publishes_infra_inputs: true,
    },
    StageDescriptor {
        name: "scan-engine",
        source: "https://github.com/KaribuLab/titvo-security-scan.git",
        checkout_dir: "titvo-security-scan",
        working_subpath: "aws",
        node_build: false,
        publishes_infra_inputs: false,
    },
    StageDescriptor {
        name: "auth-setup",
        source: "https://github.com/KaribuLab/titvo-auth-setup-aws.git",
        checkout_dir: "titvo-auth-setup-aws",
        working_subpath: "aws",
        node_build: true,
        publishes_infra_inputs: false,
    },
    StageDescriptor {
        name: "task-cli-files",
        source: "https://github.com/KaribuLab/titvo-task-cli-files-aws.git",
        checkout_dir: "titvo-task-cli-files-aws",
        working_subpath: "aws",
        node_build: true,
        publishes_infra_inputs: false,
    },
    StageDescriptor {
        name: "task-trigger",
        source: "https://github.com/KaribuLab/titvo-task-trigger-aws.git",
        checkout_dir: "titvo-task-trigger-aws",
        working_subpath: "aws",
        node_build: true,
        publishes_infra_inputs: false,
    },
    StageDescriptor {
        name: "task-status",
        source: "https://github.com/KaribuLab/titvo-task-status-aws.git",
        checkout_dir: "titvo-task-status-aws",
        working_subpath: "aws",
        node_build: true,
        publishes_infra_inputs: false,
    },
];

/// Per-stage progress, advanced strictly left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StageProgress {
    Pending,
    ArtifactFetched,
    EnvironmentAssembled,
    Applied,
}

/// IaC engine lifecycle phase within a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IacPhase {
    Init,
    Plan,
    Apply,
}

impl IacPhase {
    /// All phases, in invocation order.
    pub const ALL: [IacPhase; 3] = [IacPhase::Init, IacPhase::Plan, IacPhase::Apply];

    /// The terragrunt subcommand for this phase.
    #[must_use]
    pub fn command(self) -> &'static str {
        match self {
            IacPhase::Init => "init",
            IacPhase::Plan => "plan",
            IacPhase::Apply => "apply",
        }
    }
}

impl fmt::Display for IacPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command())
    }
}
