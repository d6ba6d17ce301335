//! CFO profiles and search
//!
//! Search runs the SQL pre-filter in the repository, then applies
//! [`CfoFilter::matches`] to every candidate before paginating, so the
//! result set is exactly what the predicate accepts.

use rextrix_core::{CfoFilter, CfoProfile, DomainError, PageQuery, Snowflake};
use tracing::{debug, info, instrument};

use crate::dto::requests::parse_prefecture;
use crate::dto::{CfoProfileResponse, CfoSearchQuery, PaginatedResponse, UpsertCfoProfileRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::user::UserService;

pub struct CfoService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CfoService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, query))]
    pub async fn search(
        &self,
        query: CfoSearchQuery,
        page: PageQuery,
    ) -> ServiceResult<PaginatedResponse<CfoProfileResponse>> {
        let filter = query.into_filter()?;
        let matched = self.search_profiles(&filter).await?;

        let total = matched.len() as i64;
        let items = matched
            .iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .map(CfoProfileResponse::from)
            .collect();

        Ok(PaginatedResponse::new(items, page.page, page.per_page, total))
    }

    /// Every active CFO profile the filter accepts, newest first
    pub async fn search_profiles(&self, filter: &CfoFilter) -> ServiceResult<Vec<CfoProfile>> {
        let candidates = self.ctx.cfo_profile_repo().search(filter).await?;
        let candidate_count = candidates.len();

        let matched: Vec<CfoProfile> = candidates
            .into_iter()
            .filter(|profile| filter.matches(profile))
            .collect();

        debug!(candidate_count, matched = matched.len(), "CFO search");
        Ok(matched)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, user_id: Snowflake) -> ServiceResult<CfoProfileResponse> {
        let profile = self
            .ctx
            .cfo_profile_repo()
            .find_by_user(user_id)
            .await?
            .ok_or(DomainError::ProfileNotFound(user_id))?;
        Ok(CfoProfileResponse::from(&profile))
    }

    /// Create or replace the caller's profile. Only `cfo` accounts have one.
    #[instrument(skip(self, request))]
    pub async fn upsert_own(
        &self,
        user_id: Snowflake,
        request: UpsertCfoProfileRequest,
    ) -> ServiceResult<CfoProfileResponse> {
        let user = UserService::new(self.ctx).find(user_id).await?;
        if !user.is_cfo() {
            return Err(DomainError::WrongUserType("cfo").into());
        }

        let mut profile = self
            .ctx
            .cfo_profile_repo()
            .find_by_user(user_id)
            .await?
            .unwrap_or_else(|| CfoProfile::new(user_id, request.display_name.clone()));

        profile.display_name = request.display_name.trim().to_string();
        profile.prefecture = parse_prefecture(request.prefecture)?;
        profile.location = request.location;
        profile.skills = clean_tags(request.skills);
        profile.bio = request.bio;
        profile.experience_years = request.experience_years;
        profile.compensation_type = request.compensation_type;
        profile.monthly_fee_min = request.monthly_fee_min;
        profile.monthly_fee_max = request.monthly_fee_max;
        profile.hourly_fee_min = request.hourly_fee_min;
        profile.hourly_fee_max = request.hourly_fee_max;
        profile.compensation_text = request.compensation_text;
        profile.weekly_days = request.weekly_days;
        profile.availability_text = request.availability_text;
        profile.avatar_url = user.avatar_url.clone();
        profile.updated_at = chrono::Utc::now();

        profile.normalize_legacy();
        profile.validate()?;

        self.ctx.cfo_profile_repo().upsert(&profile).await?;

        info!(user_id = %user_id, "CFO profile saved");
        Ok(CfoProfileResponse::from(&profile))
    }
}

/// Trim, drop blanks and duplicates, keep order
pub(crate) fn clean_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::TestContext;
    use rextrix_core::{CompensationType, UserStatus, UserType};

    fn request(name: &str) -> UpsertCfoProfileRequest {
        UpsertCfoProfileRequest {
            display_name: name.into(),
            prefecture: None,
            location: None,
            skills: vec![],
            bio: None,
            experience_years: None,
            compensation_type: None,
            monthly_fee_min: None,
            monthly_fee_max: None,
            hourly_fee_min: None,
            hourly_fee_max: None,
            compensation_text: None,
            weekly_days: None,
            availability_text: None,
        }
    }

    fn cfo_with_monthly_min(t: &TestContext, min: i64) -> Snowflake {
        let user = t.add_user(UserType::Cfo);
        let mut p = CfoProfile::new(user.id, format!("CFO {min}"));
        p.compensation_type = Some(CompensationType::Monthly);
        p.monthly_fee_min = Some(min);
        t.put_cfo_profile(p);
        user.id
    }

    #[test]
    fn test_clean_tags() {
        let tags = vec![" IPO ".into(), "".into(), "IPO".into(), "M&A".into()];
        assert_eq!(clean_tags(tags), vec!["IPO".to_string(), "M&A".to_string()]);
    }

    #[tokio::test]
    async fn test_search_applies_band_predicate() {
        let t = TestContext::new();
        let high = cfo_with_monthly_min(&t, 2_000_000);
        let _low = cfo_with_monthly_min(&t, 500_000);

        let page = CfoService::new(&t.ctx)
            .search(
                CfoSearchQuery {
                    compensation: Some("月額制：200万円以上".into()),
                    ..Default::default()
                },
                PageQuery::default(),
            )
            .await
            .unwrap();

        assert_eq!(page.pagination.total, 1);
        assert_eq!(page.items[0].user_id, high.to_string());
    }

    #[tokio::test]
    async fn test_empty_search_returns_every_active_cfo() {
        let t = TestContext::new();
        cfo_with_monthly_min(&t, 300_000);
        cfo_with_monthly_min(&t, 900_000);
        let hidden = cfo_with_monthly_min(&t, 1_500_000);
        t.set_status(hidden, UserStatus::Suspended);

        let page = CfoService::new(&t.ctx)
            .search(CfoSearchQuery::default(), PageQuery::default())
            .await
            .unwrap();
        assert_eq!(page.pagination.total, 2);
    }

    #[tokio::test]
    async fn test_search_matches_legacy_text_rows() {
        let t = TestContext::new();
        let user = t.add_user(UserType::Cfo);
        let mut p = CfoProfile::new(user.id, "Legacy".into());
        p.compensation_text = Some("月額100万円〜".into());
        p.availability_text = Some("週3日".into());
        p.location = Some("東京都港区".into());
        t.put_cfo_profile(p);

        let page = CfoService::new(&t.ctx)
            .search(
                CfoSearchQuery {
                    compensation: Some("月額制：100万円〜200万円".into()),
                    weekly_days: Some(2),
                    prefecture: Some("東京都".into()),
                    skills: None,
                },
                PageQuery::default(),
            )
            .await
            .unwrap();
        assert_eq!(page.pagination.total, 1);
        assert_eq!(page.items[0].monthly_fee_min, Some(1_000_000));
    }

    #[tokio::test]
    async fn test_search_paginates_after_filtering() {
        let t = TestContext::new();
        for min in [100_000, 200_000, 300_000] {
            cfo_with_monthly_min(&t, min);
        }
        cfo_with_monthly_min(&t, 3_000_000);

        let page = CfoService::new(&t.ctx)
            .search(
                CfoSearchQuery {
                    compensation: Some("monthly_up_to_500k".into()),
                    ..Default::default()
                },
                PageQuery::new(2, 2),
            )
            .await
            .unwrap();
        assert_eq!(page.pagination.total, 3);
        assert_eq!(page.items.len(), 1);
        assert!(!page.pagination.has_more);
    }

    #[tokio::test]
    async fn test_upsert_own_requires_cfo_account() {
        let t = TestContext::new();
        let company = t.add_user(UserType::Company);

        let err = CfoService::new(&t.ctx)
            .upsert_own(company.id, request("Not a CFO"))
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "WRONG_USER_TYPE");
        assert_eq!(err.status_code(), 403);
    }

    #[tokio::test]
    async fn test_upsert_own_normalizes_and_persists() {
        let t = TestContext::new();
        let cfo = t.add_user(UserType::Cfo);

        let mut req = request("Suzuki");
        req.prefecture = Some("大阪".into());
        req.skills = vec!["IPO".into(), " IPO".into()];
        req.availability_text = Some("週2〜3日".into());

        let saved = CfoService::new(&t.ctx).upsert_own(cfo.id, req).await.unwrap();
        assert_eq!(saved.prefecture.map(|p| p.as_str()), Some("大阪府"));
        assert_eq!(saved.skills, vec!["IPO".to_string()]);
        assert_eq!(saved.weekly_days, Some(3));

        let fetched = CfoService::new(&t.ctx).get(cfo.id).await.unwrap();
        assert_eq!(fetched.display_name, "Suzuki");
    }

    #[tokio::test]
    async fn test_get_missing_profile() {
        let t = TestContext::new();
        let err = CfoService::new(&t.ctx).get(Snowflake::new(5)).await.unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_PROFILE");
    }
}
