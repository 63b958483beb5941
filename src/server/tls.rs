// TLS setup module
// Loads a pre-existing PEM certificate/key pair; never generates one

use rustls_pki_types::{CertificateDer, PrivateKeyDer};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tokio_rustls::rustls::ServerConfig;
use tokio_rustls::TlsAcceptor;

#[derive(Debug, Error)]
pub enum TlsError {
    #[error("certificate file not found: {0}")]
    MissingCertificate(String),

    #[error("key file not found: {0}")]
    MissingKey(String),

    #[error("no private key found in {0}")]
    NoPrivateKey(String),

    #[error("failed to read {path}: {source}")]
    Io { path: String, source: io::Error },

    #[error("invalid certificate or key: {0}")]
    Rustls(#[from] tokio_rustls::rustls::Error),
}

/// Build a TLS acceptor from PEM-encoded certificate and key files.
///
/// When TLS is requested explicitly, a missing or unparsable file is a
/// hard startup error; there is no silent fallback to plain HTTP.
pub fn build_acceptor(cert_file: &str, key_file: &str) -> Result<TlsAcceptor, TlsError> {
    if !Path::new(cert_file).exists() {
        return Err(TlsError::MissingCertificate(cert_file.to_string()));
    }
    if !Path::new(key_file).exists() {
        return Err(TlsError::MissingKey(key_file.to_string()));
    }

    let certs = load_certs(cert_file)?;
    let key = load_key(key_file)?;

    let config = ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(certs, key)?;

    Ok(TlsAcceptor::from(Arc::new(config)))
}

fn load_certs(path: &str) -> Result<Vec<CertificateDer<'static>>, TlsError> {
    let file = File::open(path).map_err(|e| TlsError::Io {
        path: path.to_string(),
        source: e,
    })?;
    let mut reader = BufReader::new(file);
    rustls_pemfile::certs(&mut reader)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| TlsError::Io {
            path: path.to_string(),
            source: e,
        })
}

fn load_key(path: &str) -> Result<PrivateKeyDer<'static>, TlsError> {
    let file = File::open(path).map_err(|e| TlsError::Io {
        path: path.to_string(),
        source: e,
    })?;
    let mut reader = BufReader::new(file);
    rustls_pemfile::private_key(&mut reader)
        .map_err(|e| TlsError::Io {
            path: path.to_string(),
            source: e,
        })?
        .ok_or_else(|| TlsError::NoPrivateKey(path.to_string()))
}
