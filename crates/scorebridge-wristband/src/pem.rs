//! SAML signing-certificate normalization.

/// Width of base64 body lines in a PEM block.
const PEM_LINE_WIDTH: usize = 64;

/// Normalizes a SAML signing certificate to PEM form.
///
/// Input that already carries a `BEGIN CERTIFICATE` marker is passed
/// through untouched. Anything else is treated as raw base64: all
/// whitespace is stripped, the payload is re-wrapped at 64 columns, and
/// PEM begin/end markers are added. The base64 payload itself is not
/// validated here; a malformed certificate surfaces as an upstream
/// rejection.
#[must_use]
pub fn normalize_certificate(certificate: &str) -> String {
    if certificate.contains("BEGIN CERTIFICATE") {
        return certificate.to_string();
    }

    let payload: Vec<char> = certificate.chars().filter(|c| !c.is_whitespace()).collect();

    let mut pem = String::with_capacity(payload.len() + payload.len() / PEM_LINE_WIDTH + 64);
    pem.push_str("-----BEGIN CERTIFICATE-----\n");
    for line in payload.chunks(PEM_LINE_WIDTH) {
        pem.extend(line);
        pem.push('\n');
    }
    pem.push_str("-----END CERTIFICATE-----\n");
    pem
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pem_input_passes_through_unchanged() {
        let pem = "-----BEGIN CERTIFICATE-----\nMIIB\n-----END CERTIFICATE-----\n";
        assert_eq!(normalize_certificate(pem), pem);
    }

    #[test]
    fn raw_base64_is_wrapped_at_64_columns() {
        let raw = "A".repeat(100);
        let pem = normalize_certificate(&raw);
        let lines: Vec<&str> = pem.lines().collect();
        assert_eq!(lines[0], "-----BEGIN CERTIFICATE-----");
        assert_eq!(lines[1], "A".repeat(64));
        assert_eq!(lines[2], "A".repeat(36));
        assert_eq!(lines[3], "-----END CERTIFICATE-----");
    }

    #[test]
    fn embedded_whitespace_is_stripped_before_wrapping() {
        let raw = format!("  {}\n\t{} ", "B".repeat(30), "B".repeat(40));
        let pem = normalize_certificate(&raw);
        let lines: Vec<&str> = pem.lines().collect();
        assert_eq!(lines[1], "B".repeat(64));
        assert_eq!(lines[2], "B".repeat(6));
    }

    #[test]
    fn empty_input_yields_empty_pem_block() {
        let pem = normalize_certificate("");
        assert_eq!(
            pem,
            "-----BEGIN CERTIFICATE-----\n-----END CERTIFICATE-----\n"
        );
    }
}
