//! User-facing strings. The backends and their users speak Italian.

// Auth gate
pub const LOGIN_FAILED: &str = "Login fallito";
pub const CONNECTION_ERROR: &str = "Errore di connessione";
pub const LOGIN_FIELDS_REQUIRED: &str = "Inserisci username e password";
pub const SESSION_MISSING: &str = "Sessione scaduta, effettua di nuovo il login";

// Navigation shell
pub const WELCOME: &str = "Benvenuto! Seleziona una sezione dal menu.";

// Jobs
pub const JOBS_LOAD_FAILED: &str = "Errore nel caricamento job distribuiti";
pub const JOB_CREATE_FAILED: &str = "Creazione job fallita";
pub const JOB_CREATE_CONNECTION: &str = "Errore di connessione o formato config non valido";
pub const JOB_DETAIL_FAILED: &str = "Errore nel caricamento dettagli job";
pub const AGENT_ID_REQUIRED: &str = "Agent ID obbligatorio";

// Project
pub const PROJECT_CREATE_FAILED: &str = "Errore nella creazione del progetto";
pub const PROJECT_FIELDS_REQUIRED: &str = "Nome e descrizione sono obbligatori";

// System
pub const SCAN_FAILED: &str = "Errore scansione applicazioni";
pub const START_FAILED: &str = "Errore avvio applicazione";
pub const PROCESSES_FAILED: &str = "Errore caricamento processi";
pub const KILL_FAILED: &str = "Errore terminazione processo";
pub const AUTHORIZE_FAILED: &str = "Errore autorizzazione";
pub const APP_REQUIRED: &str = "Seleziona un'applicazione";

// Chat
pub const CHAT_FAILED: &str = "Errore nella comunicazione con Super Agent";

// Watchdog
pub const WATCHDOG_ACTIVATED: &str = "Attivato";
pub const WATCHDOG_DEACTIVATED: &str = "Disattivato";
pub const WATCHDOG_LIMIT_UPDATED: &str = "Soglia aggiornata";
pub const WATCHDOG_MOVEMENT_ADDED: &str = "Movimento aggiunto";
pub const WATCHDOG_STATUS_FAILED: &str = "Errore caricamento stato watchdog";
pub const WATCHDOG_NOTIFICATIONS_FAILED: &str = "Errore caricamento notifiche";
pub const WATCHDOG_SWITCH_FAILED: &str = "Errore cambio stato watchdog";
pub const WATCHDOG_LIMIT_FAILED: &str = "Errore aggiornamento soglia";
pub const WATCHDOG_MOVEMENT_FAILED: &str = "Errore aggiunta movimento";
pub const WATCHDOG_LIMIT_INVALID: &str = "Soglia non valida";
pub const WATCHDOG_AMOUNT_INVALID: &str = "Importo non valido";

// Console shell
pub const CONSOLE_INIT: &str = "[system] Inizializzazione interfaccia Super Agent...";
pub const CONSOLE_ONLINE: &str = "[system] Collegato a Super Agent API.";
pub const CONSOLE_OFFLINE: &str = "[system] Impossibile contattare Super Agent API.";
pub const CONSOLE_ANALYZE_PATH_REQUIRED: &str = "[user] Specifica un percorso file per l'analisi.";
pub const CONSOLE_LLM_PATH_REQUIRED: &str = "[user] Specifica un percorso file per LLM.";
pub const CONSOLE_REPORT_REQUESTED: &str = "[user] Richiesto report.";
pub const CONSOLE_LLM_RECEIVED: &str = "[agent] Risposta LLM ricevuta.";
pub const NO_OUTPUT: &str = "(nessun output)";
pub const NO_REPLY: &str = "(nessuna risposta)";
