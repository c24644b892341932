//! Platform detection and install hints.

use std::fs;

/// Operating system detection result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    MacOS,
    Windows,
    Linux(LinuxDistro),
}

/// Linux distribution family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinuxDistro {
    Debian,
    Fedora,
    Arch,
    Unknown,
}

pub fn detect_os() -> Os {
    if cfg!(target_os = "macos") {
        Os::MacOS
    } else if cfg!(target_os = "windows") {
        Os::Windows
    } else {
        Os::Linux(
            fs::read_to_string("/etc/os-release")
                .map_or(LinuxDistro::Unknown, |content| classify_os_release(&content)),
        )
    }
}

/// Classify the contents of `/etc/os-release`.
pub fn classify_os_release(content: &str) -> LinuxDistro {
    let content = content.to_lowercase();
    let mentions = |names: &[&str]| names.iter().any(|name| content.contains(name));

    if mentions(&["debian", "ubuntu", "pop!_os", "mint"]) {
        LinuxDistro::Debian
    } else if mentions(&["fedora", "rhel", "centos", "rocky", "alma"]) {
        LinuxDistro::Fedora
    } else if mentions(&["arch", "manjaro"]) {
        LinuxDistro::Arch
    } else {
        LinuxDistro::Unknown
    }
}

/// How to install a component locally, if there is a platform command for it.
///
/// The framework has no hint: it is pinned into the setup requirements.
pub fn install_hint(component: &str, os: Os) -> Option<&'static str> {
    let hint = match (component, os) {
        ("python", Os::MacOS) => "brew install python",
        ("python", Os::Windows) => "winget install Python.Python.3.11",
        ("python", Os::Linux(LinuxDistro::Debian)) => "sudo apt install python3 python3-pip",
        ("python", Os::Linux(LinuxDistro::Fedora)) => "sudo dnf install python3 python3-pip",
        ("python", Os::Linux(LinuxDistro::Arch)) => "sudo pacman -S python python-pip",
        ("python", Os::Linux(LinuxDistro::Unknown)) => "install Python 3 from your package manager",
        ("build tool", Os::MacOS) => "brew install cmake",
        ("build tool", Os::Windows) => "winget install Kitware.CMake",
        ("build tool", Os::Linux(LinuxDistro::Debian)) => "sudo apt install cmake",
        ("build tool", Os::Linux(LinuxDistro::Fedora)) => "sudo dnf install cmake",
        ("build tool", Os::Linux(LinuxDistro::Arch)) => "sudo pacman -S cmake",
        ("build tool", Os::Linux(LinuxDistro::Unknown)) => "pip install cmake",
        _ => return None,
    };
    Some(hint)
}
