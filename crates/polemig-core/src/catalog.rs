//! Fixed lookup tables: communication bundles, wire templates, carrier
//! precedence and classification keywords.
//!
//! All tables are compile-time constants, shared read-only by every
//! document in a batch.

use phf::phf_map;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Messenger {
    pub size: &'static str,
    pub core_strands: u32,
    pub conductor_strands: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundleComponent {
    pub size: &'static str,
}

/// Canonical configuration for one carrier's attachments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bundle {
    pub messenger: Messenger,
    pub components: &'static [BundleComponent],
    pub group: &'static str,
}

/// Wire fields written for a given messenger size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireTemplate {
    pub size: &'static str,
    pub core_strands: u32,
    pub conductor_strands: u32,
    pub calculation: &'static str,
}

// ---------------------------------------------------------------------------
// Bundles
// ---------------------------------------------------------------------------

pub const GENERIC_CARRIER: &str = "generic";

const EHS_QUARTER: Messenger = Messenger { size: "1/4\" EHS", core_strands: 1, conductor_strands: 7 };
const EHS_6M: Messenger = Messenger { size: "6M EHS", core_strands: 1, conductor_strands: 7 };
const EHS_10M: Messenger = Messenger { size: "10M EHS", core_strands: 1, conductor_strands: 7 };
const SS_144: Messenger = Messenger { size: "144ct SS", core_strands: 0, conductor_strands: 1 };

static BUNDLES: phf::Map<&'static str, Bundle> = phf_map! {
    "comcast" => Bundle {
        messenger: EHS_QUARTER,
        components: &[BundleComponent { size: ".500coax" }],
        group: "Comcast Coax",
    },
    "centurylink" => Bundle {
        messenger: EHS_10M,
        components: &[BundleComponent { size: "100PR Copper" }],
        group: "CTL Copper",
    },
    "brightspeed" => Bundle {
        messenger: EHS_10M,
        components: &[BundleComponent { size: "100PR Copper" }],
        group: "CTL Copper",
    },
    "gigapower" => Bundle {
        messenger: EHS_6M,
        components: &[BundleComponent { size: "144ct (GIG)" }],
        group: "Gigapower Fiber",
    },
    "upn" => Bundle {
        messenger: SS_144,
        components: &[BundleComponent { size: "144ct (UPN)" }],
        group: "UPN Fiber",
    },
    "verizon" => Bundle {
        messenger: SS_144,
        components: &[BundleComponent { size: "144ct (VZW)" }],
        group: "Verizon Fiber",
    },
    "vexus" => Bundle {
        messenger: EHS_QUARTER,
        components: &[BundleComponent { size: "144ct (VEX)" }],
        group: "Vexus Fiber",
    },
    "generic" => Bundle {
        messenger: EHS_QUARTER,
        components: &[BundleComponent { size: "Generic Cable" }],
        group: "Communication",
    },
};

/// Bundle for a carrier key, falling back to the generic bundle.
pub fn bundle(carrier: &str) -> &'static Bundle {
    BUNDLES
        .get(carrier)
        .or_else(|| BUNDLES.get(GENERIC_CARRIER))
        .expect("generic bundle is always present")
}

// ---------------------------------------------------------------------------
// Wire templates
// ---------------------------------------------------------------------------

pub const FALLBACK_TEMPLATE_SIZE: &str = "1/4\" EHS";

static TEMPLATES: phf::Map<&'static str, WireTemplate> = phf_map! {
    "1/4\" EHS" => WireTemplate { size: "1/4\" EHS", core_strands: 1, conductor_strands: 7, calculation: "STATIC" },
    "6M EHS" => WireTemplate { size: "6M EHS", core_strands: 1, conductor_strands: 7, calculation: "STATIC" },
    "10M EHS" => WireTemplate { size: "10M EHS", core_strands: 1, conductor_strands: 7, calculation: "STATIC" },
    "144ct SS" => WireTemplate { size: "144ct SS", core_strands: 0, conductor_strands: 1, calculation: "STATIC" },
};

/// Template for a messenger size, falling back to the 1/4" EHS template.
pub fn template(size: &str) -> &'static WireTemplate {
    TEMPLATES
        .get(size)
        .or_else(|| TEMPLATES.get(FALLBACK_TEMPLATE_SIZE))
        .expect("fallback template is always present")
}

/// `conductorProperties` given to bundled wires that had none.
pub const BUNDLE_CONDUCTOR_DIAMETER: f64 = 0.25;
pub const BUNDLE_CONDUCTOR_WEIGHT: f64 = 0.1;

// ---------------------------------------------------------------------------
// Carriers and keywords
// ---------------------------------------------------------------------------

/// Carrier keys in precedence order, each with the lowercase owner-id
/// substrings that select it. First match wins.
pub const CARRIERS: &[(&str, &[&str])] = &[
    ("comcast", &["comcast"]),
    ("centurylink", &["centurylink", "ctl"]),
    ("brightspeed", &["brightspeed"]),
    ("gigapower", &["gigapower"]),
    ("upn", &["upn"]),
    ("verizon", &["verizon", "vzw"]),
    ("vexus", &["vexus"]),
];

/// `usageGroup` values that already mark a wire as communication.
pub const COMMUNICATION_USAGE_GROUPS: &[&str] =
    &["COMMUNICATION", "COMMUNICATION_SERVICE", "COMMUNICATION_BUNDLE"];

/// Lowercase owner-id substrings that mark a communication owner.
pub const COMMUNICATION_OWNER_KEYWORDS: &[&str] = &[
    "comcast",
    "centurylink",
    "ctl",
    "brightspeed",
    "gigapower",
    "upn",
    "verizon",
    "vzw",
    "vexus",
    "at&t",
    "fiber",
    "cable",
    "telco",
    "telecom",
];

/// Lowercase wire-id substrings that mark a communication wire.
pub const COMMUNICATION_WIRE_ID_KEYWORDS: &[&str] = &["comm", "fiber", "cable", "telco", "phone"];
