#![allow(dead_code)]

pub mod command;

/// Lines of a command's stdout, for order-sensitive assertions
pub fn stdout_lines(output: &std::process::Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}
