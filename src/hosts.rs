//! Backend host data model

/// A named backend endpoint capable of validating credentials.
///
/// `endpoint` is an absolute http(s) URL, stored without a trailing
/// slash and without the auth path (both enforced at configuration
/// load). Hosts are immutable once constructed and shared read-only by
/// every concurrent probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    pub endpoint: String,
    pub name: String,
}

impl Host {
    pub fn new(name: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            name: name.into(),
        }
    }
}

/// Ordered list of all hosts a credential check fans out to.
///
/// Order carries no meaning for the race — every host is probed in
/// parallel. The registry may be empty, in which case every check
/// resolves to the uniform failure response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostRegistry {
    hosts: Vec<Host>,
}

impl HostRegistry {
    pub fn new(hosts: Vec<Host>) -> Self {
        Self { hosts }
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Host> {
        self.hosts.iter()
    }
}
