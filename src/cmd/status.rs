use crate::config::{LINKHUT_TOKEN_VAR, LINKPREVIEW_KEY_VAR};
use colored::Colorize;
use std::env;

pub fn config_status() -> Result<(), anyhow::Error> {
    println!("Configuration status:");

    print_credential("LinkHut API token", LINKHUT_TOKEN_VAR);
    print_credential("Link preview API key", LINKPREVIEW_KEY_VAR);

    Ok(())
}

fn print_credential(name: &str, var: &str) {
    match env::var(var) {
        Ok(credential) => {
            println!("{}", format!("{name} is configured").green());
            println!("   {var}: {}", mask(&credential));
        }
        Err(_) => {
            println!("{}", format!("{name} is not configured").red());
        }
    }
}

/// Mask a credential, keeping the first and last four characters.
fn mask(credential: &str) -> String {
    let chars = credential.chars().collect::<Vec<_>>();

    if chars.len() > 8 {
        let prefix = chars[..4].iter().collect::<String>();
        let suffix = chars[chars.len() - 4..].iter().collect::<String>();
        format!("{prefix}{}{suffix}", "*".repeat(chars.len() - 8))
    } else {
        "****".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask() {
        assert_eq!(mask("abcdefghijkl"), "abcd****ijkl");
        assert_eq!(mask("short"), "****");
    }

    #[test]
    fn test_mask_multibyte() {
        assert_eq!(mask("ähjklmnopqrsß"), "ähjk*****qrsß");
        assert_eq!(mask("äöüßé"), "****");
    }
}
