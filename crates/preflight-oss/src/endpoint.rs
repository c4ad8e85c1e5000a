//! OSS endpoint table and validation
//!
//! The accepted endpoints are an explicit list of the documented public,
//! internal, finance-cloud, and government-cloud hosts. The list is
//! intentionally strict so a typo surfaces as a configuration error instead
//! of a DNS failure deep inside a run. Aliyun occasionally adds regions;
//! extend the tables as the docs grow.

use once_cell::sync::Lazy;
use preflight_types::{Error, Result};
use std::collections::HashSet;

/// Public (external) OSS regions, deprecated ones retained for compatibility
pub const PUBLIC_REGIONS: &[&str] = &[
    "cn-hangzhou",
    "cn-shanghai",
    "cn-nanjing",
    "cn-fuzhou",
    "cn-wuhan-lr",
    "cn-qingdao",
    "cn-beijing",
    "cn-zhangjiakou",
    "cn-huhehaote",
    "cn-wulanchabu",
    "cn-shenzhen",
    "cn-heyuan",
    "cn-guangzhou",
    "cn-chengdu",
    "cn-hongkong",
    "rg-china-mainland",
    "ap-northeast-1",
    "ap-northeast-2",
    "ap-southeast-1",
    "ap-southeast-3",
    "ap-southeast-5",
    "ap-southeast-6",
    "ap-southeast-7",
    "eu-central-1",
    "eu-west-1",
    "us-west-1",
    "us-east-1",
    "na-south-1",
    "me-east-1",
];

/// Regions reachable only from the intranet (government / dedicated clouds)
pub const INTERNAL_ONLY_REGIONS: &[&str] = &["cn-north-2-gov-1"];

/// Finance-cloud public hosts documented outside the standard pattern
const FINANCE_PUBLIC_HOSTS: &[&str] = &[
    "oss-cn-hzfinance.aliyuncs.com",
    "oss-cn-shanghai-finance-1-pub.aliyuncs.com",
    "oss-cn-szfinance.aliyuncs.com",
    "oss-cn-shenzhen-finance-1-pub.aliyuncs.com",
    "oss-cn-beijing-finance-1-pub.aliyuncs.com",
];

/// Finance and government intranet hosts documented outside the standard pattern
const SPECIAL_INTERNAL_HOSTS: &[&str] = &[
    "oss-cn-hzjbp-a-internal.aliyuncs.com",
    "oss-cn-hzjbp-b-internal.aliyuncs.com",
    "oss-cn-shanghai-finance-1-internal.aliyuncs.com",
    "oss-cn-shenzhen-finance-1-internal.aliyuncs.com",
    "oss-cn-shenzhen-finance-1-pub-internal.aliyuncs.com",
    "oss-cn-shanghai-finance-1-pub-internal.aliyuncs.com",
    "oss-cn-hzfinance-internal.aliyuncs.com",
    "oss-cn-szfinance-internal.aliyuncs.com",
    "oss-cn-north-2-gov-1-internal.aliyuncs.com",
];

static KNOWN_HOSTS: Lazy<HashSet<String>> = Lazy::new(|| {
    let mut hosts = HashSet::new();
    for region in PUBLIC_REGIONS {
        hosts.insert(format!("oss-{region}.aliyuncs.com"));
        // rg-china-mainland is the one public region without an intranet twin.
        if *region != "rg-china-mainland" {
            hosts.insert(format!("oss-{region}-internal.aliyuncs.com"));
        }
    }
    for host in FINANCE_PUBLIC_HOSTS {
        hosts.insert((*host).to_string());
    }
    for host in SPECIAL_INTERNAL_HOSTS {
        hosts.insert((*host).to_string());
    }
    hosts
});

/// A validated OSS endpoint host
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    host: String,
}

impl Endpoint {
    /// Default endpoint host
    pub const DEFAULT_HOST: &'static str = "oss-cn-beijing.aliyuncs.com";

    /// Parse and validate an endpoint host
    ///
    /// Accepts bare host names; a leading `http(s)://` scheme and trailing
    /// slashes are tolerated and stripped. Anything not in the documented
    /// endpoint tables is rejected with a configuration error.
    pub fn parse(raw: &str) -> Result<Self> {
        let host = raw.trim().trim_end_matches('/');
        let host = host
            .strip_prefix("https://")
            .or_else(|| host.strip_prefix("http://"))
            .unwrap_or(host);

        if KNOWN_HOSTS.contains(host) {
            Ok(Self {
                host: host.to_string(),
            })
        } else {
            Err(Error::config(format!(
                "Unknown OSS endpoint '{raw}'; expected a documented host such as '{}'",
                Self::DEFAULT_HOST
            )))
        }
    }

    /// The validated host name
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Whether this endpoint is an intranet host
    pub fn is_internal(&self) -> bool {
        self.host.contains("-internal.")
    }

    /// The region encoded in the host, when it follows the standard pattern
    ///
    /// Finance hosts outside the `oss-<region>` pattern return `None`.
    pub fn region(&self) -> Option<&str> {
        let host = self.host.strip_suffix(".aliyuncs.com")?;
        let host = host.strip_prefix("oss-")?;
        let region = host.strip_suffix("-internal").unwrap_or(host);
        if PUBLIC_REGIONS.contains(&region) || INTERNAL_ONLY_REGIONS.contains(&region) {
            Some(region)
        } else {
            None
        }
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            host: Self::DEFAULT_HOST.to_string(),
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.host)
    }
}

impl std::str::FromStr for Endpoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
