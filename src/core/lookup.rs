use std::collections::HashMap;

use crate::models::{CapabilityProfile, LicenseInstance, Opening, Organization, Site};

/// Id-indexed views over the collections an opening refers to.
///
/// Build once per batch of referrals; every lookup afterwards is O(1).
#[derive(Debug, Default)]
pub struct LookupTables<'a> {
    organizations: HashMap<&'a str, &'a Organization>,
    sites: HashMap<&'a str, &'a Site>,
    licenses: HashMap<&'a str, &'a LicenseInstance>,
    capabilities_by_site: HashMap<&'a str, &'a CapabilityProfile>,
    capabilities_by_org: HashMap<&'a str, &'a CapabilityProfile>,
}

/// Everything known about the provider behind one opening
#[derive(Debug, Clone, Copy, Default)]
pub struct OpeningContext<'a> {
    pub organization: Option<&'a Organization>,
    pub site: Option<&'a Site>,
    pub license: Option<&'a LicenseInstance>,
    pub capability: Option<&'a CapabilityProfile>,
}

impl<'a> OpeningContext<'a> {
    pub fn site_county(&self) -> Option<&'a str> {
        self.site.and_then(|site| site.county.as_deref())
    }
}

impl<'a> LookupTables<'a> {
    pub fn new(
        organizations: &'a [Organization],
        sites: &'a [Site],
        licenses: &'a [LicenseInstance],
        capabilities: &'a [CapabilityProfile],
    ) -> Self {
        let organizations = organizations
            .iter()
            .map(|org| (org.id.as_str(), org))
            .collect();
        let sites = sites.iter().map(|site| (site.id.as_str(), site)).collect();
        // later records for the same organization replace earlier ones
        let licenses = licenses
            .iter()
            .map(|license| (license.organization_id.as_str(), license))
            .collect();

        let mut capabilities_by_site = HashMap::new();
        let mut capabilities_by_org = HashMap::new();
        for profile in capabilities {
            if let Some(site_id) = profile.site_id.as_deref() {
                capabilities_by_site.insert(site_id, profile);
            }
            if let Some(org_id) = profile.organization_id.as_deref() {
                capabilities_by_org.insert(org_id, profile);
            }
        }

        Self {
            organizations,
            sites,
            licenses,
            capabilities_by_site,
            capabilities_by_org,
        }
    }

    pub fn organization(&self, id: &str) -> Option<&'a Organization> {
        self.organizations.get(id).copied()
    }

    pub fn site(&self, id: &str) -> Option<&'a Site> {
        self.sites.get(id).copied()
    }

    pub fn license(&self, organization_id: &str) -> Option<&'a LicenseInstance> {
        self.licenses.get(organization_id).copied()
    }

    /// Site-level profile first, organization-level as fallback
    pub fn capability(&self, site_id: Option<&str>, organization_id: &str) -> Option<&'a CapabilityProfile> {
        site_id
            .and_then(|id| self.capabilities_by_site.get(id).copied())
            .or_else(|| self.capabilities_by_org.get(organization_id).copied())
    }

    pub fn context_for(&self, opening: &Opening) -> OpeningContext<'a> {
        let site_id = opening.site_id.as_deref();
        OpeningContext {
            organization: self.organization(&opening.organization_id),
            site: site_id.and_then(|id| self.site(id)),
            license: self.license(&opening.organization_id),
            capability: self.capability(site_id, &opening.organization_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SeverityLevel;

    fn profile(site_id: Option<&str>, org_id: Option<&str>, aggression: SeverityLevel) -> CapabilityProfile {
        let mut profile = CapabilityProfile {
            site_id: site_id.map(str::to_string),
            organization_id: org_id.map(str::to_string),
            ..Default::default()
        };
        profile.behavioral.aggression_severity = aggression;
        profile
    }

    #[test]
    fn test_capability_prefers_site_profile() {
        let capabilities = vec![
            profile(None, Some("org1"), SeverityLevel::Mild),
            profile(Some("site1"), None, SeverityLevel::Severe),
        ];
        let tables = LookupTables::new(&[], &[], &[], &capabilities);

        let by_site = tables.capability(Some("site1"), "org1").unwrap();
        assert_eq!(by_site.behavioral.aggression_severity, SeverityLevel::Severe);

        let fallback = tables.capability(Some("site2"), "org1").unwrap();
        assert_eq!(fallback.behavioral.aggression_severity, SeverityLevel::Mild);

        assert!(tables.capability(None, "org2").is_none());
    }

    #[test]
    fn test_last_license_wins() {
        let licenses = vec![
            LicenseInstance {
                id: Some("l1".to_string()),
                organization_id: "org1".to_string(),
                status: "pending".to_string(),
            },
            LicenseInstance {
                id: Some("l2".to_string()),
                organization_id: "org1".to_string(),
                status: "verified".to_string(),
            },
        ];
        let tables = LookupTables::new(&[], &[], &licenses, &[]);

        assert!(tables.license("org1").unwrap().is_verified());
    }

    #[test]
    fn test_context_for_opening() {
        let organizations = vec![Organization {
            id: "org1".to_string(),
            legal_name: "Northside Living".to_string(),
            counties_served: vec!["Anoka".to_string()],
        }];
        let sites = vec![Site {
            id: "site1".to_string(),
            organization_id: "org1".to_string(),
            county: Some("Hennepin".to_string()),
            city: Some("Minneapolis".to_string()),
        }];
        let tables = LookupTables::new(&organizations, &sites, &[], &[]);
        let opening = Opening {
            id: "o1".to_string(),
            organization_id: "org1".to_string(),
            site_id: Some("site1".to_string()),
            ..Default::default()
        };

        let context = tables.context_for(&opening);

        assert_eq!(context.organization.unwrap().legal_name, "Northside Living");
        assert_eq!(context.site_county(), Some("Hennepin"));
        assert!(context.license.is_none());
        assert!(context.capability.is_none());
    }
}
