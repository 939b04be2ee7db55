use tally_domain::{CategoryId, ExpenseId, YearMonth};

pub(crate) const CATEGORIES: &str = "/categories";
pub(crate) const EXPENSES: &str = "/expenses";
pub(crate) const LOGIN: &str = "/auth/login";
pub(crate) const REGISTER: &str = "/auth/register";
pub(crate) const RESET_PASSWORD: &str = "/auth/reset-password";

pub(crate) fn category(id: CategoryId) -> String {
    format!("{CATEGORIES}/{id}")
}

pub(crate) fn expense(id: ExpenseId) -> String {
    format!("{EXPENSES}/{id}")
}

pub(crate) fn expenses_in_month(period: YearMonth) -> String {
    format!("{EXPENSES}/month/{}/{}", period.year(), period.month())
}

/// Creation target: the owning category travels in the path.
pub(crate) fn expenses_of_category(category_id: CategoryId) -> String {
    format!("{EXPENSES}/{category_id}")
}

pub(crate) fn expense_in_category(id: ExpenseId, category_id: CategoryId) -> String {
    format!("{EXPENSES}/{id}/category/{category_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_route_is_not_zero_padded() {
        let period = YearMonth::new(2024, 5).unwrap();
        assert_eq!(expenses_in_month(period), "/expenses/month/2024/5");
    }

    #[test]
    fn expense_routes_embed_category() {
        assert_eq!(expenses_of_category(3), "/expenses/3");
        assert_eq!(expense_in_category(8, 3), "/expenses/8/category/3");
    }
}
