//! Validation flag registry — single source of truth for local-only queries.

use std::ffi::OsStr;

/// A flag that marks an invocation as a local capability query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationFlag {
    /// Exact token as ffmpeg accepts it (e.g., "-codecs").
    pub flag: &'static str,
    /// Human-readable description (for logs).
    pub description: &'static str,
}

impl ValidationFlag {
    /// Exact token equality. No prefix matching, no `--` normalisation.
    pub fn matches(&self, arg: &OsStr) -> bool {
        arg == OsStr::new(self.flag)
    }
}

static VALIDATION_FLAGS: [ValidationFlag; 13] = [
    ValidationFlag {
        flag: "-version",
        description: "Show version",
    },
    ValidationFlag {
        flag: "-f",
        description: "Force format (also used to probe format support)",
    },
    ValidationFlag {
        flag: "-formats",
        description: "List available formats",
    },
    ValidationFlag {
        flag: "-codecs",
        description: "List available codecs",
    },
    ValidationFlag {
        flag: "-decoders",
        description: "List available decoders",
    },
    ValidationFlag {
        flag: "-encoders",
        description: "List available encoders",
    },
    ValidationFlag {
        flag: "-bsfs",
        description: "List available bitstream filters",
    },
    ValidationFlag {
        flag: "-protocols",
        description: "List available protocols",
    },
    ValidationFlag {
        flag: "-filters",
        description: "List available filters",
    },
    ValidationFlag {
        flag: "-pix_fmts",
        description: "List available pixel formats",
    },
    ValidationFlag {
        flag: "-layouts",
        description: "List standard channel layouts",
    },
    ValidationFlag {
        flag: "-sample_fmts",
        description: "List available audio sample formats",
    },
    ValidationFlag {
        flag: "-buildconf",
        description: "Show build configuration",
    },
];

/// The complete, compile-time validation flag set.
pub fn validation_flags() -> &'static [ValidationFlag] {
    &VALIDATION_FLAGS
}

/// Look up the registry entry for `arg`, if any.
pub fn find_flag<'r>(arg: &OsStr, registry: &'r [ValidationFlag]) -> Option<&'r ValidationFlag> {
    registry.iter().find(|def| def.matches(arg))
}
