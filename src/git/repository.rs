use crate::error::{FloatingTagError, Result};
use crate::git::tag_refspec;
use git2::{Oid, Repository as Git2Repo};
use std::cell::{Cell, RefCell};
use std::path::Path;

/// Credential attempts allowed per push before giving up; libgit2 keeps asking
/// for as long as the callback keeps answering.
const MAX_CREDENTIAL_ATTEMPTS: u32 = 3;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
    token: Option<String>,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo, token: None })
    }

    /// Use an HTTPS token (e.g. `GITHUB_TOKEN`) when the remote asks for credentials
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    fn remote_callbacks<'cb>(
        &'cb self,
        attempts: &'cb Cell<u32>,
        rejection: &'cb RefCell<Option<String>>,
    ) -> git2::RemoteCallbacks<'cb> {
        let mut callbacks = git2::RemoteCallbacks::new();

        callbacks.credentials(move |_url, username_from_url, allowed_types| {
            attempts.set(attempts.get() + 1);
            if attempts.get() > MAX_CREDENTIAL_ATTEMPTS {
                return Err(git2::Error::from_str("authentication failed"));
            }

            if allowed_types.contains(git2::CredentialType::USER_PASS_PLAINTEXT) {
                if let Some(token) = &self.token {
                    return git2::Cred::userpass_plaintext("x-access-token", token);
                }
            }

            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                let username = username_from_url.unwrap_or("git");
                if let Ok(cred) = git2::Cred::ssh_key_from_agent(username) {
                    return Ok(cred);
                }

                if let Some(home) = dirs::home_dir() {
                    for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                        let path = home.join(".ssh").join(key);
                        if path.exists() {
                            if let Ok(cred) = git2::Cred::ssh_key(username, None, &path, None) {
                                return Ok(cred);
                            }
                        }
                    }
                }
            }

            git2::Cred::default()
        });

        callbacks.push_update_reference(move |refname, status| {
            if let Some(status) = status {
                *rejection.borrow_mut() = Some(format!("{} rejected: {}", refname, status));
            }
            Ok(())
        });

        callbacks
    }
}

impl super::Repository for Git2Repository {
    fn resolve_commit(&self, reference: &str) -> Result<Oid> {
        let object = self.repo.revparse_single(reference)?;
        let commit = object.peel_to_commit()?;

        Ok(commit.id())
    }

    fn resolve_tag_commit(&self, tag_name: &str) -> Result<Option<Oid>> {
        let reference_name = format!("refs/tags/{}", tag_name);

        match self.repo.find_reference(&reference_name) {
            Ok(reference) => Ok(Some(reference.peel_to_commit()?.id())),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(FloatingTagError::Git(e)),
        }
    }

    fn tag_exists(&self, tag_name: &str) -> Result<bool> {
        match self.repo.find_reference(&format!("refs/tags/{}", tag_name)) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(false),
            Err(e) => Err(FloatingTagError::Git(e)),
        }
    }

    fn create_tag(&self, name: &str, oid: Oid, force: bool) -> Result<()> {
        let object = self.repo.find_object(oid, None)?;

        self.repo.tag_lightweight(name, &object, force)?;

        Ok(())
    }

    fn push_tag(&self, remote: &str, tag_name: &str, force: bool) -> Result<()> {
        let mut remote = self
            .repo
            .find_remote(remote)
            .map_err(|e| FloatingTagError::remote(format!("Cannot find remote: {}", e)))?;

        let attempts = Cell::new(0);
        let rejection = RefCell::new(None);

        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(self.remote_callbacks(&attempts, &rejection));

        let refspec = tag_refspec(tag_name, force);

        remote
            .push(&[refspec.as_str()], Some(&mut push_options))
            .map_err(|e| match e.class() {
                git2::ErrorClass::Net => {
                    FloatingTagError::remote(format!("Network error during push: {}", e))
                }
                _ => FloatingTagError::remote(format!("Push failed: {}", e)),
            })?;

        if let Some(reason) = rejection.borrow_mut().take() {
            return Err(FloatingTagError::remote(reason));
        }

        Ok(())
    }
}
