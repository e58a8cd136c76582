pub const SOURCE_PATH: &str = "bokutlån.csv";
pub const ERROR_LOG_PATH: &str = "errors_from_csv.txt";

pub const COL_FIRST_NAME: &str = "Fornavn";
pub const COL_LAST_NAME: &str = "Etternavn";
pub const COL_TITLE: &str = "Boktittel";
pub const COL_GENRE: &str = "Sjanger";
pub const COL_LOAN_DATE: &str = "Lånedato";
pub const COL_LOAN_PERIOD: &str = "Låneperiode";
pub const COL_EXTENSION: &str = "Forlenget";
pub const COL_RETURNED: &str = "Tilbakelevert";

pub const DEFAULT_LOAN_PERIOD_DAYS: u32 = 14;
pub const DEFAULT_EXTENSION_DAYS: u32 = 0;

/// `DD/MM/YYYY`, checked for shape before chrono sees it.
pub const LOAN_DATE_FORMAT: &str = "%d/%m/%Y";

pub const RETURNED_YES: &str = "ja";
pub const RETURNED_NO: &str = "nei";

pub const GENRE_FICTION: &str = "fiksjon";
pub const GENRE_CRIME: &str = "krim";
pub const GENRE_NON_FICTION: &str = "sakprosa";
pub const GENRE_FANTASY: &str = "fantasy";
