//! Console reporting helpers shared by both tools.

/// Print the tool banner
pub fn banner(title: &str) {
    println!("{}", "=".repeat(40));
    println!("{title}");
    println!("{}", "=".repeat(40));
}
