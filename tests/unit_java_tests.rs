//! # Java Module Unit Tests / Java 模块单元测试
//!
//! Version-output parsing, the module-open flag rule, the debug agent flag and
//! `java` binary selection.
//!
//! 版本输出解析、模块开放参数规则、调试代理参数以及 `java` 可执行文件选择。

mod common;

use tf_launcher::core::java::{
    debug_agent_flag, needs_module_open_flags, parse_java_version, JavaVersion, DEFAULT_DEBUG_PORT,
};

#[cfg(test)]
mod version_parsing_tests {
    use super::*;

    #[test]
    fn test_accepted_versions_are_detected() {
        let cases = [
            ("java version \"1.8.0_292\"", JavaVersion::V1_8),
            ("openjdk version \"9.0.4\"", JavaVersion::V9),
            ("openjdk version \"9\"", JavaVersion::V9),
            ("openjdk version \"11.0.20\" 2023-07-18", JavaVersion::V11),
            ("openjdk version \"17.0.2\" 2022-01-18", JavaVersion::V17),
            ("openjdk version \"17-ea\" 2021-09-14", JavaVersion::V17),
            ("openjdk version \"21\" 2023-09-19", JavaVersion::V21),
        ];
        for (output, expected) in cases {
            assert_eq!(parse_java_version(output), Some(expected), "{output}");
        }
    }

    #[test]
    fn test_unsupported_versions_are_rejected() {
        for output in [
            "java version \"1.7.0\"",
            "java version \"1.6.0_45\"",
            "openjdk version \"18.0.2\"",
            "openjdk version \"1.80\"",
            "openjdk version \"110\"",
            "openjdk version \"22\" 2024-03-19",
            "",
            "Error: could not find libjava.so",
        ] {
            assert_eq!(parse_java_version(output), None, "{output}");
        }
    }

    #[test]
    fn test_version_found_after_preamble_lines() {
        let output = "Picked up JAVA_TOOL_OPTIONS: -Dfile.encoding=UTF8\nopenjdk version \"17.0.8\" 2023-07-18\n";
        assert_eq!(parse_java_version(output), Some(JavaVersion::V17));
    }

    #[test]
    fn test_version_display_matches_accepted_set() {
        let rendered: Vec<String> = JavaVersion::ACCEPTED.iter().map(|v| v.to_string()).collect();
        assert_eq!(rendered, ["1.8", "9", "11", "17", "21"]);
    }
}

#[cfg(test)]
mod flag_tests {
    use super::*;

    #[test]
    fn test_module_open_flags_depend_only_on_1_8() {
        assert!(!needs_module_open_flags(Some(JavaVersion::V1_8)));
        for version in [JavaVersion::V9, JavaVersion::V11, JavaVersion::V17, JavaVersion::V21] {
            assert!(needs_module_open_flags(Some(version)));
        }
        // Undetected versions get the flags too.
        assert!(needs_module_open_flags(None));
    }

    #[test]
    fn test_debug_agent_flag_default_port() {
        assert_eq!(
            debug_agent_flag(None, DEFAULT_DEBUG_PORT),
            "-agentlib:jdwp=transport=dt_socket,server=y,suspend=y,address=10088"
        );
    }

    #[test]
    fn test_debug_agent_flag_explicit_port() {
        assert!(debug_agent_flag(Some("9999"), DEFAULT_DEBUG_PORT).ends_with("address=9999"));
    }
}

#[cfg(all(test, unix))]
mod selection_tests {
    use super::common::{linux_env, write_fake_java, JAVA_11};
    use std::path::Path;
    use tempfile::tempdir;
    use tf_launcher::core::java::select_java_binary;
    use tf_launcher::LaunchError;

    #[test]
    fn test_java_home_takes_precedence_over_path() {
        let temp_dir = tempdir().unwrap();
        let home = temp_dir.path().join("jdk");
        let on_path = temp_dir.path().join("other");
        let expected = write_fake_java(&home, JAVA_11);
        write_fake_java(&on_path, JAVA_11);

        let env = linux_env(
            [
                ("TF_JAVA_HOME", home.display().to_string()),
                ("PATH", on_path.join("bin").display().to_string()),
            ],
            Path::new("/nonexistent"),
        );
        assert_eq!(select_java_binary(&env).unwrap(), expected);
    }

    #[test]
    fn test_java_found_on_path() {
        let temp_dir = tempdir().unwrap();
        let expected = write_fake_java(temp_dir.path(), JAVA_11);
        let env = linux_env(
            [("PATH", temp_dir.path().join("bin").display().to_string())],
            Path::new("/nonexistent"),
        );
        assert_eq!(select_java_binary(&env).unwrap(), expected);
    }

    #[test]
    fn test_missing_java_is_tool_not_found() {
        let temp_dir = tempdir().unwrap();
        let env = linux_env(
            [("TF_JAVA_HOME", temp_dir.path().join("nojdk").display().to_string())],
            Path::new("/nonexistent"),
        );
        let err = select_java_binary(&env).unwrap_err();
        assert!(matches!(err, LaunchError::ToolNotFound { .. }));
        assert_eq!(err.exit_code(), 1);
    }
}
