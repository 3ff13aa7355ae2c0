//! Default configuration values

/// Manifest file name
pub const MANIFEST_FILE: &str = "pfftx.toml";

/// Fallback compiler when no override or PATH detection succeeds
pub const DEFAULT_MPICC: &str = "mpicc";

/// Environment variable overriding the compiler for both the MPI-aware
/// and plain compilation roles
pub const MPICC_ENV: &str = "MPICC";

/// Environment variable carrying the optimization flag forwarded to the
/// dependency build
pub const OPTIMIZE_ENV: &str = "OPTIMIZE";

/// Environment variable with extra compiler flags appended to the
/// manifest's
pub const CFLAGS_ENV: &str = "CFLAGS";

/// Default dependency build script, relative to the project root
pub const DEFAULT_BUILD_SCRIPT: &str = "depends/install_pfft.sh";

/// Flag appended to CFLAGS when building the dependency stack
pub const VISIBILITY_FLAG: &str = "-fvisibility=hidden";

/// Artifact marking a completed dependency build, relative to the prefix
pub const SENTINEL_ARTIFACT: &str = "lib/libpfft.a";

/// Stamp file recording the fingerprint of the last successful dependency
/// build, relative to the prefix
pub const STAMP_FILE: &str = ".pfftx-stamp";

/// Lock file guarding concurrent dependency builds of one prefix
pub const LOCK_FILE: &str = ".pfftx-lock";

/// Subdirectory of a temp root used as the dependency prefix
pub const PREFIX_DIR: &str = "depends";

/// Subdirectory of the prefix where the dependency build compiles each
/// library package
pub const DEPENDS_BUILD_DIR: &str = "build";

/// Static libraries required on the link line, in link order. Earlier
/// archives reference symbols from later ones.
pub const REQUIRED_LIBRARIES: &[&str] = &[
    "libpfft.a",
    "libpfftf.a",
    "libfftw3_mpi.a",
    "libfftw3f_mpi.a",
    "libfftw3.a",
    "libfftw3f.a",
];

/// Marker prefix for per-extension temporary build roots
pub const TEMP_ROOT_PREFIX: &str = "tmp-";

/// Generic build output directory
pub const OUTPUT_DIR: &str = "build";

/// Subdirectory of the output directory receiving linked shared objects
pub const OUTPUT_LIB_DIR: &str = "lib";
