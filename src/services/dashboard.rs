//! Панель организатора: собственные активные события и их удаление.

use tracing::{info, warn};

use crate::error::{AppError, Result};
use crate::models::event::{EventDto, EventFilterDto};
use crate::services::api::ApiClient;

pub const DASHBOARD_PAGE_SIZE: u32 = 10;

/// Одна страница панели.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardPage {
    pub events: Vec<EventDto>,
    pub page_number: u32,
    pub total_count: u64,
    pub total_pages: u32,
}

impl DashboardPage {
    pub fn has_next(&self) -> bool {
        self.page_number < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page_number > 1
    }
}

pub fn total_pages(total_count: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    total_count.div_ceil(page_size as u64) as u32
}

#[derive(Debug, Clone)]
pub struct EventsDashboard {
    client: ApiClient,
}

impl EventsDashboard {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Фильтр страницы для текущего организатора. Номер страницы
    /// считается с единицы.
    pub fn filter_for(user_id: &str, page: u32) -> EventFilterDto {
        EventFilterDto {
            is_active: Some(true),
            created_by_id: Some(user_id.to_string()),
            page_number: Some(page.max(1)),
            page_size: Some(DASHBOARD_PAGE_SIZE),
            ..Default::default()
        }
    }

    pub async fn my_events(&self, page: u32) -> Result<DashboardPage> {
        let user_id = self.client.session().user_id()?;
        let filter = Self::filter_for(&user_id, page);
        let paged = self.client.list_events(&filter).await?.into_result()?;

        let page_number = if paged.page_number > 0 { paged.page_number } else { page.max(1) };
        Ok(DashboardPage {
            total_pages: total_pages(paged.total_count, DASHBOARD_PAGE_SIZE),
            total_count: paged.total_count,
            page_number,
            events: paged.items,
        })
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let deleted = self.client.delete_event(id).await?.into_result()?;
        if !deleted {
            warn!("Event {} was not deleted", id);
            return Err(AppError::Api {
                status: None,
                messages: vec![format!("Event {} could not be deleted", id)],
            });
        }
        info!("Event {} deleted", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(5, 0), 0);
    }

    #[test]
    fn filter_is_scoped_to_the_organiser() {
        let filter = EventsDashboard::filter_for("u-9", 0);
        assert_eq!(
            filter.to_query_string(),
            "isActive=true&createdById=u-9&pageNumber=1&pageSize=10"
        );
    }

    #[test]
    fn page_navigation_flags() {
        let page = DashboardPage {
            events: vec![],
            page_number: 2,
            total_count: 25,
            total_pages: 3,
        };
        assert!(page.has_next());
        assert!(page.has_prev());
    }
}
