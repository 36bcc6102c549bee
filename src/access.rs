// This file is part of the product Portico.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::HttpRequest;

#[derive(Debug)]
pub struct AccessDenied {
    pub reason: String,
}

impl std::fmt::Display for AccessDenied {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Access denied: {}", self.reason)
    }
}

impl std::error::Error for AccessDenied {}

/// Membership gate consulted before any public resolution proceeds. Policy is
/// supplied by the embedder; the dispatcher only honors the verdict.
pub trait MembershipAuthorizer: Send + Sync {
    fn authorize(&self, req: &HttpRequest) -> Result<(), AccessDenied>;
}

/// Default authorizer: every request passes.
pub struct OpenAccess;

impl MembershipAuthorizer for OpenAccess {
    fn authorize(&self, _req: &HttpRequest) -> Result<(), AccessDenied> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn open_access_admits_everything() {
        let req = TestRequest::default().to_http_request();
        assert!(OpenAccess.authorize(&req).is_ok());
    }
}
