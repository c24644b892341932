//! Outputs handed to the packaging tool.

use std::collections::BTreeMap;

use serde::Serialize;

use super::build_config::BuildConfig;
use crate::settings::ResolverSettings;

/// Requirement lists and native build arguments for one build invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildPlan {
    pub setup_requires: Vec<String>,
    pub install_requires: Vec<String>,
    pub extras_require: BTreeMap<String, Vec<String>>,
    pub cmake_args: Vec<String>,
}

impl BuildPlan {
    /// Assemble the plan from a resolved config.
    pub fn assemble(config: &BuildConfig, settings: &ResolverSettings) -> Self {
        let mut setup_requires = settings.base_setup_requires.clone();
        if let Some(requirement) = &config.framework_setup_requirement {
            setup_requires.push(requirement.clone());
        }
        if config.build_tool_required() {
            setup_requires.push(settings.build_tool.clone());
        }

        let mut extras_require = settings.extras_require.clone();
        extras_require.insert("cpu".to_string(), vec![config.variants.cpu.clone()]);
        extras_require.insert("gpu".to_string(), vec![config.variants.gpu.clone()]);

        Self {
            setup_requires,
            install_requires: settings.install_requires.clone(),
            extras_require,
            cmake_args: cmake_args(config, settings),
        }
    }

    /// Pretty JSON for the packaging step.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn cmake_bool(value: bool) -> &'static str {
    if value { "TRUE" } else { "FALSE" }
}

fn cmake_args(config: &BuildConfig, settings: &ResolverSettings) -> Vec<String> {
    vec![
        format!(
            "-DTENSORFLOW_ROOT:STRING={}",
            config.install_location.path().display()
        ),
        format!(
            "-DBUILD_PY_IF:BOOL={}",
            cmake_bool(settings.build_python_interface)
        ),
        format!(
            "-DBUILD_CPP_IF:BOOL={}",
            cmake_bool(settings.build_cpp_interface)
        ),
        format!(
            "-DFLOAT_PREC:STRING={}",
            settings.float_precision.as_str()
        ),
    ]
}
