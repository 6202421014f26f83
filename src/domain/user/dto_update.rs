#[derive(Debug, Clone, Default)]
pub struct UpdateUserDto {
    pub username: Option<String>,
    pub email: Option<String>,
    pub is_active: Option<bool>,
}
