//! 证书解析
//!
//! PEM block splitting, domain extraction (subject CN plus SAN DNS names) and,
//! with the `azure` feature, PKCS#12 packaging of a certificate/key pair.

use std::io::BufReader;

use rustls_pki_types::{CertificateDer, PrivateKeyDer};
use x509_parser::extensions::GeneralName;
use x509_parser::prelude::*;

use crate::error::{DeployError, Result};
use crate::types::DomainSet;

/// Every certificate block of a PEM chain, leaf first.
pub fn certificates_from_pem(cert_pem: &str) -> Result<Vec<CertificateDer<'static>>> {
    let mut reader = BufReader::new(cert_pem.as_bytes());
    let certs = rustls_pemfile::certs(&mut reader)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| DeployError::certificate(format!("failed to read certificate PEM: {e}")))?;

    if certs.is_empty() {
        return Err(DeployError::certificate("no certificate found in PEM"));
    }
    Ok(certs)
}

/// First private key of a PEM document (PKCS#1, PKCS#8 or SEC1).
pub fn private_key_from_pem(key_pem: &str) -> Result<PrivateKeyDer<'static>> {
    let mut reader = BufReader::new(key_pem.as_bytes());

    loop {
        match rustls_pemfile::read_one(&mut reader)
            .map_err(|e| DeployError::certificate(format!("failed to read private key PEM: {e}")))?
        {
            Some(rustls_pemfile::Item::Pkcs1Key(key)) => return Ok(key.into()),
            Some(rustls_pemfile::Item::Pkcs8Key(key)) => return Ok(key.into()),
            Some(rustls_pemfile::Item::Sec1Key(key)) => return Ok(key.into()),
            None => break,
            _ => {}
        }
    }

    Err(DeployError::certificate("no private key found in PEM"))
}

/// Domains served by the leaf certificate of `cert_pem`.
pub fn domains_from_certificate(cert_pem: &str) -> Result<DomainSet> {
    let certs = certificates_from_pem(cert_pem)?;
    let leaf = certs
        .first()
        .ok_or_else(|| DeployError::certificate("no certificate found in PEM"))?;
    domains_from_der(leaf.as_ref())
}

/// Domains served by a DER encoded certificate: CN first, then SAN DNS names.
pub fn domains_from_der(der: &[u8]) -> Result<DomainSet> {
    let (_, cert) = parse_x509_certificate(der)
        .map_err(|e| DeployError::certificate(format!("invalid X.509 certificate: {e}")))?;

    let cn = cert
        .subject()
        .iter_common_name()
        .next()
        .and_then(|cn| cn.as_str().ok())
        .map(String::from);

    let san: Vec<String> = cert
        .subject_alternative_name()
        .ok()
        .flatten()
        .map(|ext| {
            ext.value
                .general_names
                .iter()
                .filter_map(|name| match name {
                    GeneralName::DNSName(dns) => Some((*dns).to_string()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(DomainSet::new(cn.into_iter().chain(san)))
}

/// Package a PEM chain and key as a DER encoded PKCS#12 archive with an empty password.
///
/// The first certificate becomes the leaf, the rest are added as CA certificates.
#[cfg(feature = "azure")]
pub fn pem_to_pkcs12(cert_pem: &str, key_pem: &str) -> Result<Vec<u8>> {
    use openssl::pkcs12::Pkcs12;
    use openssl::pkey::PKey;
    use openssl::stack::Stack;
    use openssl::x509::X509;

    let pkcs12_error = |e: openssl::error::ErrorStack| {
        DeployError::certificate(format!("failed to build PKCS#12: {e}"))
    };

    let mut chain = X509::stack_from_pem(cert_pem.as_bytes())
        .map_err(|e| DeployError::certificate(format!("failed to read certificate PEM: {e}")))?
        .into_iter();
    let leaf = chain
        .next()
        .ok_or_else(|| DeployError::certificate("no certificate found in PEM"))?;
    let key = PKey::private_key_from_pem(key_pem.as_bytes())
        .map_err(|e| DeployError::certificate(format!("failed to read private key PEM: {e}")))?;

    let mut builder = Pkcs12::builder();
    builder.pkey(&key).cert(&leaf);

    let mut ca = Stack::new().map_err(pkcs12_error)?;
    let mut has_ca = false;
    for cert in chain {
        ca.push(cert).map_err(pkcs12_error)?;
        has_ca = true;
    }
    if has_ca {
        builder.ca(ca);
    }

    builder
        .build2("")
        .and_then(|p| p.to_der())
        .map_err(pkcs12_error)
}
