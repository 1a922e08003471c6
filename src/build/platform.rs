//! Platform matrix and artifact naming.
//!
//! The matrix is a fixed enumeration of (OS, architecture) pairs the pipeline
//! produces artifacts for. Every entry maps to a `GOOS`/`GOARCH` pair the
//! toolchain can cross-compile for; there is no windows/arm64 entry.

use std::fmt;

/// Operating system half of a build target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
    /// Native OS of the build host.
    Linux,
    /// Alternate OS, always cross-compiled.
    Windows,
}

impl Os {
    /// Value passed to the toolchain as `GOOS`.
    pub fn goos(&self) -> &'static str {
        match self {
            Os::Linux => "linux",
            Os::Windows => "windows",
        }
    }
}

/// CPU architecture half of a build target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    Amd64,
    Arm64,
    /// 32-bit x86, spelled `386` by the toolchain.
    X86,
}

impl Arch {
    /// Value passed to the toolchain as `GOARCH`.
    pub fn goarch(&self) -> &'static str {
        match self {
            Arch::Amd64 => "amd64",
            Arch::Arm64 => "arm64",
            Arch::X86 => "386",
        }
    }
}

/// One (OS, architecture) pair artifacts are built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform {
    pub os: Os,
    pub arch: Arch,
}

impl Platform {
    pub const LINUX_AMD64: Platform = Platform { os: Os::Linux, arch: Arch::Amd64 };
    pub const LINUX_ARM64: Platform = Platform { os: Os::Linux, arch: Arch::Arm64 };
    pub const WINDOWS_AMD64: Platform = Platform { os: Os::Windows, arch: Arch::Amd64 };
    pub const WINDOWS_386: Platform = Platform { os: Os::Windows, arch: Arch::X86 };

    /// The full cross-compilation matrix, in build order.
    pub const MATRIX: [Platform; 4] = [
        Platform::LINUX_AMD64,
        Platform::LINUX_ARM64,
        Platform::WINDOWS_AMD64,
        Platform::WINDOWS_386,
    ];

    /// Whether this is the host-native target (the one the manifest is
    /// extracted from).
    pub fn is_host_native(&self) -> bool {
        *self == Platform::LINUX_AMD64
    }

    pub fn is_windows(&self) -> bool {
        self.os == Os::Windows
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os.goos(), self.arch.goarch())
    }
}

/// Output filename for a suite test binary on the given platform.
///
/// Linux binaries carry a `.{arch}.test` suffix; Windows binaries use the
/// historical `{suite}64.exe` / `{suite}32.exe` short form. Two distinct
/// (suite, platform) pairs never collide, and the pair is recoverable from
/// the name alone.
pub fn suite_binary_name(suite: &str, platform: Platform) -> String {
    match platform.os {
        Os::Linux => format!("{}.{}.test", suite, platform.arch.goarch()),
        // Exhaustive on purpose: a new arch must pick its own name here
        // rather than silently reuse an existing one.
        Os::Windows => match platform.arch {
            Arch::Amd64 => format!("{}64.exe", suite),
            Arch::Arm64 => format!("{}arm64.exe", suite),
            Arch::X86 => format!("{}32.exe", suite),
        },
    }
}

/// Output filename for a suite's test-name manifest.
pub fn suite_manifest_name(suite: &str) -> String {
    format!("{}_tests.txt", suite)
}

/// A fixed helper binary built once per pipeline run, before any suite.
#[derive(Debug, Clone, Copy)]
pub struct HelperBinary {
    pub name: &'static str,
    /// Entrypoint package path relative to the suite root.
    pub entrypoint: &'static str,
    /// Targets to build for, in build order.
    pub targets: &'static [Platform],
}

/// Wrapper binary, built for the whole matrix.
pub const WRAPPER: HelperBinary = HelperBinary {
    name: "wrapper",
    entrypoint: "cmd/wrapper/main",
    targets: &Platform::MATRIX,
};

/// Manager binary, host-native only.
pub const MANAGER: HelperBinary = HelperBinary {
    name: "manager",
    entrypoint: "cmd/manager/main",
    targets: &[Platform::LINUX_AMD64],
};

impl HelperBinary {
    /// Output filename for this helper on the given platform.
    ///
    /// A single-target helper keeps its bare name. Multi-target helpers get
    /// an arch suffix on Linux; Windows names keep the historical short form
    /// (first five characters of the name, then a bit-width or arch tag).
    pub fn artifact_name(&self, platform: Platform) -> String {
        if self.targets.len() == 1 {
            return self.name.to_string();
        }
        match platform.os {
            Os::Linux => format!("{}.{}", self.name, platform.arch.goarch()),
            Os::Windows => {
                let short: String = self.name.chars().take(5).collect();
                match platform.arch {
                    Arch::Amd64 => format!("{}64.exe", short),
                    Arch::Arm64 => format!("{}arm64.exe", short),
                    Arch::X86 => format!("{}32.exe", short),
                }
            }
        }
    }
}
