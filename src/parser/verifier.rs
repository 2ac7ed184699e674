use super::CompileErrorType::LeftRecursion;
use super::Result;

// Only immediate left recursion (`A -> A ...`) is detected here
pub fn check_alternative(lhs: &str, alternative: &[String]) -> Result<()> {
    match alternative.first() {
        Some(first) if first == lhs => Err(LeftRecursion(lhs.to_string())),
        _ => Ok(())
    }
}

pub fn check_rule(lhs: &str, rewrite: &[Vec<String>]) -> Result<()> {
    rewrite.iter().try_for_each(|alternative| check_alternative(lhs, alternative))
}
