//! Embedded SYCEBNL reference plan.
//!
//! A representative extract of the official SYCEBNL chart (Système Comptable
//! des Entités à But Non Lucratif), covering all nine classes from class
//! roots down to sub-accounts, including the nonprofit-specific accounts
//! (adhérents, bailleurs de fonds, fonds affectés, dons et legs,
//! contributions volontaires en nature).
//!
//! The table is prefix-closed: the parent of every account is the number
//! with its last digit removed, and that parent is always present. Class
//! roots (level 0) are generated from [`AccountClass`].

use super::account::{Account, AccountClass};

/// Accounts of level 1 and deeper, as (number, label).
const REFERENCE_PLAN: &[(&str, &str)] = &[
    // ---- Classe 1 - Ressources durables ----
    ("10", "DOTATION"),
    ("101", "Dotation non consomptible sans droit de reprise"),
    ("1011", "en numéraire"),
    ("1015", "en nature"),
    ("102", "Dotation non consomptible avec droit de reprise"),
    ("1021", "en numéraire"),
    ("1025", "en nature"),
    ("103", "Droit d'entrée"),
    ("104", "Dotation consomptible"),
    ("1041", "Dotation consomptible"),
    ("1049", "Dotation consomptible inscrite au compte de résultat"),
    ("106", "Écarts de réévaluation"),
    ("11", "RÉSERVES"),
    ("112", "Réserves statutaires ou contractuelles"),
    ("118", "Autres réserves"),
    ("12", "REPORT À NOUVEAU"),
    ("121", "Report à nouveau des excédents"),
    ("128", "Résultat en instance d'affectation"),
    ("129", "Report à nouveau des déficits"),
    ("13", "RÉSULTAT NET DE L'EXERCICE"),
    ("131", "Excédent de l'exercice"),
    ("139", "Déficit de l'exercice"),
    ("14", "SUBVENTIONS D'INVESTISSEMENT"),
    ("141", "Subventions d'équipement"),
    ("1411", "État"),
    ("1414", "Communes et collectivités publiques décentralisées"),
    ("1416", "Entités et organismes privés"),
    ("1417", "Organismes internationaux"),
    ("148", "Autres subventions d'investissement"),
    ("15", "PROVISIONS RÉGLEMENTÉES ET FONDS ASSIMILÉS"),
    ("16", "FONDS AFFECTÉS"),
    ("161", "Fonds affectés provenant de dons"),
    ("162", "Fonds affectés provenant de legs"),
    ("165", "Fonds affectés provenant de subventions"),
    ("17", "FONDS REPORTÉS"),
    ("18", "EMPRUNTS ET DETTES ASSIMILÉES"),
    ("181", "Emprunts obligataires"),
    ("182", "Emprunts et dettes auprès des établissements de crédit"),
    ("19", "PROVISIONS POUR RISQUES ET CHARGES"),
    ("191", "Provisions pour risques"),
    // ---- Classe 2 - Actif immobilisé ----
    ("21", "IMMOBILISATIONS INCORPORELLES"),
    ("211", "Frais de développement"),
    ("213", "Logiciels"),
    ("22", "TERRAINS"),
    ("23", "BÂTIMENTS, INSTALLATIONS TECHNIQUES ET AGENCEMENTS"),
    ("231", "Bâtiments"),
    ("24", "MATÉRIEL, MOBILIER ET ACTIFS BIOLOGIQUES"),
    ("241", "Matériel et outillage"),
    ("244", "Matériel et mobilier de bureau"),
    ("2441", "Matériel de bureau"),
    ("2444", "Mobilier de bureau"),
    ("245", "Matériel de transport"),
    ("27", "AUTRES IMMOBILISATIONS FINANCIÈRES"),
    ("275", "Dépôts et cautionnements versés"),
    ("28", "AMORTISSEMENTS DES IMMOBILISATIONS"),
    ("283", "Amortissements des bâtiments"),
    ("284", "Amortissements du matériel"),
    // ---- Classe 3 - Stocks ----
    ("30", "MARCHANDISES"),
    ("31", "MATIÈRES PREMIÈRES ET FOURNITURES LIÉES"),
    ("32", "AUTRES APPROVISIONNEMENTS"),
    ("35", "STOCKS DE PRODUITS"),
    ("39", "DÉPRÉCIATIONS DES STOCKS ET EN-COURS"),
    // ---- Classe 4 - Tiers ----
    ("40", "FOURNISSEURS ET COMPTES RATTACHÉS"),
    ("401", "Fournisseurs"),
    ("4011", "Fournisseurs ordinaires"),
    ("408", "Fournisseurs, factures non parvenues"),
    ("41", "ADHÉRENTS, CLIENTS-USAGERS ET COMPTES RATTACHÉS"),
    ("411", "Clients-usagers"),
    ("412", "Adhérents et usagers"),
    ("4121", "Adhérents, cotisations à recevoir"),
    ("42", "PERSONNEL"),
    ("421", "Personnel, avances et acomptes"),
    ("422", "Personnel, rémunérations dues"),
    ("43", "ORGANISMES SOCIAUX"),
    ("431", "Sécurité sociale"),
    ("44", "ÉTAT ET COLLECTIVITÉS PUBLIQUES"),
    ("441", "État, subventions à recevoir"),
    ("447", "État, impôts retenus à la source"),
    ("45", "FONDATEURS, APPORTEURS ET COMPTES COURANTS"),
    ("46", "BAILLEURS, ÉTAT ET AUTRES ORGANISMES"),
    ("461", "Bailleurs de fonds, subventions à recevoir"),
    ("4611", "Bailleurs internationaux"),
    ("4612", "Bailleurs nationaux"),
    ("47", "DÉBITEURS ET CRÉDITEURS DIVERS"),
    ("471", "Débiteurs divers"),
    ("472", "Créditeurs divers"),
    // ---- Classe 5 - Trésorerie ----
    ("50", "TITRES DE PLACEMENT"),
    ("51", "VALEURS À ENCAISSER"),
    ("511", "Effets et chèques à encaisser"),
    ("52", "BANQUES"),
    ("521", "Banques locales"),
    ("5211", "Comptes en monnaie nationale"),
    ("53", "ÉTABLISSEMENTS FINANCIERS ET ASSIMILÉS"),
    ("531", "Chèques postaux"),
    ("55", "CAISSE"),
    ("551", "Caisse principale"),
    ("57", "RÉGIES D'AVANCES ET ACCRÉDITIFS"),
    ("571", "Régie d'avances"),
    ("572", "Accréditifs"),
    ("58", "VIREMENTS INTERNES"),
    ("585", "Virements de fonds"),
    // ---- Classe 6 - Charges des activités ordinaires ----
    ("60", "ACHATS ET VARIATIONS DE STOCKS"),
    ("601", "Achats de marchandises"),
    ("604", "Achats stockés de matières et fournitures consommables"),
    ("605", "Autres achats"),
    ("6051", "Fournitures non stockables - Eau"),
    ("6052", "Fournitures non stockables - Électricité"),
    ("6056", "Achats de petit matériel et outillage"),
    ("6057", "Achats de fournitures de bureau"),
    ("61", "TRANSPORTS"),
    ("611", "Transports sur achats"),
    ("614", "Transports du personnel"),
    ("618", "Autres frais de transport"),
    ("62", "SERVICES EXTÉRIEURS A"),
    ("622", "Locations et charges locatives"),
    ("624", "Entretien, réparations et maintenance"),
    ("625", "Primes d'assurance"),
    ("63", "SERVICES EXTÉRIEURS B"),
    ("631", "Frais bancaires"),
    ("632", "Rémunérations d'intermédiaires et de conseils"),
    ("64", "IMPÔTS ET TAXES"),
    ("641", "Impôts et taxes directs"),
    ("65", "AUTRES CHARGES"),
    ("658", "Charges diverses"),
    ("66", "CHARGES DE PERSONNEL"),
    ("661", "Rémunérations directes versées au personnel"),
    ("664", "Charges sociales"),
    ("67", "FRAIS FINANCIERS ET CHARGES ASSIMILÉES"),
    ("671", "Intérêts des emprunts"),
    ("68", "DOTATIONS AUX AMORTISSEMENTS"),
    ("681", "Dotations aux amortissements d'exploitation"),
    ("69", "DOTATIONS AUX PROVISIONS"),
    ("691", "Dotations aux provisions d'exploitation"),
    // ---- Classe 7 - Produits des activités ordinaires ----
    ("70", "REVENUS DES ACTIVITÉS ORDINAIRES"),
    ("701", "Ventes de marchandises"),
    ("706", "Prestations de services"),
    ("71", "SUBVENTIONS D'EXPLOITATION"),
    ("711", "Subventions d'exploitation - État"),
    ("712", "Subventions d'exploitation - Collectivités"),
    ("718", "Autres subventions d'exploitation"),
    ("74", "AUTRES PRODUITS"),
    ("746", "Cotisations des adhérents"),
    ("748", "Produits divers"),
    ("75", "TRANSFERTS DE CHARGES"),
    ("756", "Dons et legs"),
    ("7561", "Dons manuels"),
    ("7562", "Legs et donations"),
    ("76", "PRODUITS FINANCIERS"),
    ("761", "Intérêts de prêts"),
    ("77", "REPRISES DE PROVISIONS"),
    // ---- Classe 8 - Autres charges et autres produits ----
    ("81", "VALEURS COMPTABLES DES CESSIONS D'IMMOBILISATIONS"),
    ("82", "PRODUITS DES CESSIONS D'IMMOBILISATIONS"),
    ("83", "CHARGES HORS ACTIVITÉS ORDINAIRES"),
    ("84", "PRODUITS HORS ACTIVITÉS ORDINAIRES"),
    ("85", "DOTATIONS H.A.O."),
    ("86", "REPRISES H.A.O."),
    ("88", "SUBVENTIONS D'ÉQUILIBRE"),
    // ---- Classe 9 - Contributions volontaires en nature ----
    ("91", "EMPLOIS DES CONTRIBUTIONS VOLONTAIRES EN NATURE"),
    ("911", "Secours en nature"),
    ("912", "Mises à disposition gratuites de biens et services"),
    ("913", "Personnel bénévole"),
    ("95", "RESSOURCES DES CONTRIBUTIONS VOLONTAIRES EN NATURE"),
    ("951", "Bénévolat"),
    ("952", "Prestations en nature"),
    ("953", "Dons en nature"),
];

/// Builds the full reference account list: the nine class roots plus every
/// account of [`REFERENCE_PLAN`], with class, level and parent derived from
/// the account number.
#[must_use]
pub fn reference_accounts() -> Vec<Account> {
    let mut accounts: Vec<Account> = AccountClass::ALL
        .iter()
        .map(|class| Account {
            number: class.digit().to_string(),
            label: class.label().to_string(),
            class: *class,
            level: 0,
            parent: None,
        })
        .collect();

    for (number, label) in REFERENCE_PLAN {
        let Some(class) = AccountClass::from_account_number(number) else {
            continue;
        };
        let parent = &number[..number.len() - 1];
        accounts.push(Account {
            number: (*number).to_string(),
            label: (*label).to_string(),
            class,
            level: Account::level_for_number(number),
            parent: Some(parent.to_string()),
        });
    }

    accounts
}
