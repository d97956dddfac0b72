use serde::{Deserialize, Serialize};

/// SAML2 protocol settings of an identity provider.
///
/// Signing certificates are stored upstream in PEM form; callers should
/// normalize raw base64 input with [`crate::pem::normalize_certificate`]
/// before building one of these.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Saml2Config {
    pub idp_entity_id: Option<String>,
    pub idp_sso_url: Option<String>,
    #[serde(default)]
    pub x509_signing_certificates: Vec<String>,
}

/// OIDC protocol settings of an identity provider.
///
/// The upstream never echoes the client secret back in reads, so it is
/// optional on responses and skipped on requests when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OidcConfig {
    pub domain: Option<String>,
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
}

/// An external identity provider configured on a tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityProvider {
    pub id: Option<String>,
    pub name: Option<String>,
    pub display_name: Option<String>,
    #[serde(rename = "type")]
    pub idp_type: Option<String>,
    pub protocol: Option<String>,
    pub status: Option<String>,
    pub jit_provisioning_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saml2: Option<Saml2Config>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oidc: Option<OidcConfig>,
}

/// Upsert payload for a tenant identity provider. The owning tenant id
/// is filled in by the client right before the call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityProviderUpsert {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    pub name: String,
    pub display_name: String,
    #[serde(rename = "type")]
    pub idp_type: String,
    pub protocol: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jit_provisioning_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saml2: Option<Saml2Config>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oidc: Option<OidcConfig>,
}

impl IdentityProviderUpsert {
    fn status_for(enabled: bool) -> String {
        if enabled { "ENABLED" } else { "DISABLED" }.to_string()
    }

    /// Google Workspace SAML provider. Signing certificates are
    /// normalized to PEM form before being sent upstream.
    #[must_use]
    pub fn google_saml(
        idp_entity_id: &str,
        idp_sso_url: &str,
        signing_certificates: &[String],
        enabled: bool,
    ) -> Self {
        let certificates = signing_certificates
            .iter()
            .map(|c| crate::pem::normalize_certificate(c))
            .collect();
        Self {
            tenant_id: None,
            name: "google_workspace".into(),
            display_name: "Google Workspace".into(),
            idp_type: "GOOGLE_WORKSPACE".into(),
            protocol: "SAML2".into(),
            status: Self::status_for(enabled),
            jit_provisioning_enabled: None,
            saml2: Some(Saml2Config {
                idp_entity_id: Some(idp_entity_id.to_string()),
                idp_sso_url: Some(idp_sso_url.to_string()),
                x509_signing_certificates: certificates,
            }),
            oidc: None,
        }
    }

    /// Okta OIDC provider. A `None` client secret leaves the secret
    /// already stored upstream untouched.
    #[must_use]
    pub fn okta_oidc(
        domain: &str,
        client_id: &str,
        client_secret: Option<String>,
        enabled: bool,
    ) -> Self {
        Self {
            tenant_id: None,
            name: "okta".into(),
            display_name: "Okta".into(),
            idp_type: "OKTA".into(),
            protocol: "OIDC".into(),
            status: Self::status_for(enabled),
            jit_provisioning_enabled: None,
            saml2: None,
            oidc: Some(OidcConfig {
                domain: Some(domain.to_string()),
                client_id: Some(client_id.to_string()),
                client_secret,
            }),
        }
    }
}

/// Per-provider redirect URL configuration resolved by the upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdpRedirectUrlConfig {
    pub identity_provider_name: Option<String>,
    pub identity_provider_type: Option<String>,
    #[serde(default)]
    pub redirect_urls: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_skips_absent_protocol_configs() {
        let upsert = IdentityProviderUpsert::okta_oidc("acme.okta.example", "cid", None, true);
        let json = serde_json::to_value(&upsert).unwrap();
        assert!(json.get("saml2").is_none());
        assert!(json.get("tenantId").is_none());
        assert_eq!(json["type"], "OKTA");
        assert!(json["oidc"].get("clientSecret").is_none());
    }

    #[test]
    fn google_saml_normalizes_certificates() {
        let upsert = IdentityProviderUpsert::google_saml(
            "https://accounts.google.example/o/saml2?idpid=abc",
            "https://accounts.google.example/o/saml2/idp?idpid=abc",
            &["Q".repeat(70)],
            true,
        );
        let saml2 = upsert.saml2.expect("saml2 config");
        let cert = &saml2.x509_signing_certificates[0];
        assert!(cert.starts_with("-----BEGIN CERTIFICATE-----\n"));
        assert!(cert.contains(&"Q".repeat(64)));
        assert_eq!(upsert.status, "ENABLED");
    }

    #[test]
    fn okta_oidc_disabled_status() {
        let upsert = IdentityProviderUpsert::okta_oidc("acme.okta.example", "cid", None, false);
        assert_eq!(upsert.status, "DISABLED");
        assert_eq!(upsert.protocol, "OIDC");
    }

    #[test]
    fn provider_type_uses_reserved_word_rename() {
        let provider: IdentityProvider = serde_json::from_str(
            r#"{"id": "idp1", "type": "GOOGLE_WORKSPACE", "protocol": "SAML2"}"#,
        )
        .unwrap();
        assert_eq!(provider.idp_type.as_deref(), Some("GOOGLE_WORKSPACE"));
    }
}
