/// Identity handed back by the sign-in provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub name: String,
    pub email: Option<String>,
}
