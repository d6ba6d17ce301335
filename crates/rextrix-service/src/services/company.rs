//! Company profiles

use rextrix_core::{CompanyProfile, DomainError, PageQuery, Snowflake};
use tracing::{info, instrument};

use crate::dto::requests::parse_prefecture;
use crate::dto::{CompanyProfileResponse, PaginatedResponse, UpsertCompanyProfileRequest};

use super::cfo::clean_tags;
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::user::UserService;

pub struct CompanyService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CompanyService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Active companies, most recently updated first
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        page: PageQuery,
    ) -> ServiceResult<PaginatedResponse<CompanyProfileResponse>> {
        let (profiles, total) = self.ctx.company_profile_repo().list(page).await?;
        let items = profiles.iter().map(CompanyProfileResponse::from).collect();
        Ok(PaginatedResponse::new(items, page.page, page.per_page, total))
    }

    #[instrument(skip(self))]
    pub async fn get(&self, user_id: Snowflake) -> ServiceResult<CompanyProfileResponse> {
        let profile = self
            .ctx
            .company_profile_repo()
            .find_by_user(user_id)
            .await?
            .ok_or(DomainError::ProfileNotFound(user_id))?;
        Ok(CompanyProfileResponse::from(&profile))
    }

    #[instrument(skip(self, request))]
    pub async fn upsert_own(
        &self,
        user_id: Snowflake,
        request: UpsertCompanyProfileRequest,
    ) -> ServiceResult<CompanyProfileResponse> {
        let user = UserService::new(self.ctx).find(user_id).await?;
        if !user.is_company() {
            return Err(DomainError::WrongUserType("company").into());
        }

        let mut profile = self
            .ctx
            .company_profile_repo()
            .find_by_user(user_id)
            .await?
            .unwrap_or_else(|| CompanyProfile::new(user_id, request.company_name.clone()));

        profile.company_name = request.company_name.trim().to_string();
        profile.industry = request.industry;
        profile.prefecture = parse_prefecture(request.prefecture)?;
        profile.employee_count = request.employee_count;
        profile.description = request.description;
        profile.challenges = clean_tags(request.challenges);
        profile.website_url = request.website_url;
        profile.avatar_url = user.avatar_url.clone();
        profile.updated_at = chrono::Utc::now();
        profile.validate()?;

        self.ctx.company_profile_repo().upsert(&profile).await?;

        info!(user_id = %user_id, "Company profile saved");
        Ok(CompanyProfileResponse::from(&profile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::TestContext;
    use rextrix_core::{UserStatus, UserType};

    fn request(name: &str) -> UpsertCompanyProfileRequest {
        UpsertCompanyProfileRequest {
            company_name: name.into(),
            industry: Some("SaaS".into()),
            prefecture: Some("福岡県".into()),
            employee_count: Some(40),
            description: None,
            challenges: vec!["資金調達".into()],
            website_url: Some("https://example.co.jp".into()),
        }
    }

    #[tokio::test]
    async fn test_upsert_and_get() {
        let t = TestContext::new();
        let company = t.add_user(UserType::Company);
        let service = CompanyService::new(&t.ctx);

        service.upsert_own(company.id, request("株式会社テスト")).await.unwrap();
        let profile = service.get(company.id).await.unwrap();
        assert_eq!(profile.company_name, "株式会社テスト");
        assert_eq!(profile.prefecture.map(|p| p.as_str()), Some("福岡県"));
    }

    #[tokio::test]
    async fn test_cfo_cannot_write_company_profile() {
        let t = TestContext::new();
        let cfo = t.add_user(UserType::Cfo);

        let err = CompanyService::new(&t.ctx)
            .upsert_own(cfo.id, request("X"))
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "WRONG_USER_TYPE");
    }

    #[tokio::test]
    async fn test_unknown_prefecture_rejected() {
        let t = TestContext::new();
        let company = t.add_user(UserType::Company);
        let mut req = request("X");
        req.prefecture = Some("Atlantis".into());

        let err = CompanyService::new(&t.ctx)
            .upsert_own(company.id, req)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_list_skips_inactive_companies() {
        let t = TestContext::new();
        let service = CompanyService::new(&t.ctx);
        let a = t.add_user(UserType::Company);
        let b = t.add_user(UserType::Company);
        service.upsert_own(a.id, request("A")).await.unwrap();
        service.upsert_own(b.id, request("B")).await.unwrap();
        t.set_status(b.id, UserStatus::Inactive);

        let page = service.list(PageQuery::default()).await.unwrap();
        assert_eq!(page.pagination.total, 1);
        assert_eq!(page.items[0].company_name, "A");
    }
}
