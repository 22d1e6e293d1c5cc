use std::collections::HashSet;

#[tokio::main]
async fn main() {
    systemd_journal_logger::JournalLog::new()
        .unwrap()
        .with_syslog_identifier("certame-api-check".to_string())
        .install()
        .unwrap();
    log::set_max_level(log::LevelFilter::Info);

    // Load config
    let cosmic_cfg = cosmic::cosmic_config::Config::new("dev.certame.app", certame::config::CONFIG_VERSION)
        .expect("Failed to load config");
    let config = <certame::config::CertameConfig as cosmic::cosmic_config::CosmicConfigEntry>::get_entry(&cosmic_cfg)
        .unwrap_or_else(|(_, cfg)| cfg);

    println!("=== Backend Consistency Check ===\n");

    let base_url = config.api_url.trim();
    if base_url.is_empty() {
        println!("No API URL configured.");
        return;
    }

    println!("--- Backend: {} ---", base_url);

    let api = certame::api::ApiClient::new(base_url);

    // Reference tables
    let orgaos = match api.list_orgaos().await {
        Ok(list) => { println!("  orgaos_publicos: {}", list.len()); list }
        Err(e) => { println!("  Error listing orgaos_publicos: {}", e); return; }
    };
    let modalidades = match api.list_modalidades().await {
        Ok(list) => { println!("  modalidades: {}", list.len()); list }
        Err(e) => { println!("  Error listing modalidades: {}", e); return; }
    };
    let status_list = match api.list_status().await {
        Ok(list) => { println!("  status_oportunidade: {}", list.len()); list }
        Err(e) => { println!("  Error listing status_oportunidade: {}", e); return; }
    };
    let fases = match api.list_fases().await {
        Ok(list) => { println!("  fases_pipeline: {}", list.len()); list }
        Err(e) => { println!("  Error listing fases_pipeline: {}", e); return; }
    };
    let categorias = match api.list_categorias().await {
        Ok(list) => { println!("  categorias: {}", list.len()); list }
        Err(e) => { println!("  Error listing categorias: {}", e); return; }
    };

    let oportunidades = match api.list_oportunidades().await {
        Ok(list) => { println!("  oportunidades: {}", list.len()); list }
        Err(e) => { println!("  Error listing oportunidades: {}", e); return; }
    };

    // Reference ids every oportunidade points at must exist
    let orgao_ids: HashSet<i64> = orgaos.iter().map(|o| o.id).collect();
    let modalidade_ids: HashSet<i64> = modalidades.iter().map(|m| m.id).collect();
    let status_ids: HashSet<i64> = status_list.iter().map(|s| s.id).collect();
    let fase_ids: HashSet<i64> = fases.iter().map(|f| f.id).collect();
    let categoria_ids: HashSet<i64> = categorias.iter().map(|c| c.id).collect();

    let mut dangling: Vec<(i64, &str, i64)> = Vec::new();
    for op in &oportunidades {
        if let Some(id) = op.orgao_id {
            if !orgao_ids.contains(&id) {
                dangling.push((op.id, "orgao_id", id));
            }
        }
        if let Some(id) = op.modalidade_id {
            if !modalidade_ids.contains(&id) {
                dangling.push((op.id, "modalidade_id", id));
            }
        }
        if let Some(id) = op.status_id {
            if !status_ids.contains(&id) {
                dangling.push((op.id, "status_id", id));
            }
        }
        if let Some(id) = op.fase_pipeline_id {
            if !fase_ids.contains(&id) {
                dangling.push((op.id, "fase_pipeline_id", id));
            }
        }
    }

    if !dangling.is_empty() {
        println!("\n  DANGLING REFERENCES ({}):", dangling.len());
        for (op_id, field, value) in &dangling {
            println!("    oportunidade {}: {} -> {}", op_id, field, value);
        }
    }

    // Pick the record to probe: --oportunidade <id>, else the first listed
    let args: Vec<String> = std::env::args().collect();
    let target = args
        .iter()
        .position(|a| a == "--oportunidade")
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse::<i64>().ok())
        .or_else(|| oportunidades.first().map(|o| o.id));

    let target = match target {
        Some(t) => t,
        None => {
            println!("\nNo oportunidade to probe.");
            println!("\n=== Done ===");
            return;
        }
    };

    println!("\n--- Oportunidade {} ---", target);
    match api.fetch_oportunidade(target).await {
        Ok(Some(op)) => println!("  {}", op.display_title()),
        Ok(None) => {
            println!("  Not found on server");
            println!("\n=== Done ===");
            return;
        }
        Err(e) => {
            println!("  Fetch error: {}", e);
            println!("\n=== Done ===");
            return;
        }
    }

    let mut issues = dangling.len();

    match api.list_vinculos(target).await {
        Ok(vinculos) => {
            println!("  oportunidade_categoria: {}", vinculos.len());
            let orphaned: Vec<_> = vinculos
                .iter()
                .filter(|v| !categoria_ids.contains(&v.categoria_id))
                .collect();
            if !orphaned.is_empty() {
                issues += orphaned.len();
                println!("  ORPHANED LINKS ({}):", orphaned.len());
                for v in &orphaned {
                    println!("    vinculo {}: categoria_id {}", v.id, v.categoria_id);
                }
            }
        }
        Err(e) => println!("  Error listing vinculos: {}", e),
    }

    match api.list_grupos(target).await {
        Ok(grupos) => println!("  grupos: {}", grupos.len()),
        Err(e) => println!("  Error listing grupos: {}", e),
    }

    let lote_ids: HashSet<i64> = match api.list_lotes(target).await {
        Ok(lotes) => {
            println!("  lotes: {}", lotes.len());
            lotes.iter().map(|l| l.id).collect()
        }
        Err(e) => {
            println!("  Error listing lotes: {}", e);
            HashSet::new()
        }
    };

    match api.list_itens(target).await {
        Ok(itens) => {
            println!("  itens: {}", itens.len());
            let orphaned: Vec<_> = itens
                .iter()
                .filter(|i| !lote_ids.contains(&i.lote_id))
                .collect();
            if !orphaned.is_empty() {
                issues += orphaned.len();
                println!("  ORPHANED ITEMS ({}):", orphaned.len());
                for item in &orphaned {
                    println!("    item {}: lote_id {}", item.id, item.lote_id);
                }
            }
        }
        Err(e) => println!("  Error listing itens: {}", e),
    }

    match api.list_pareceres(target).await {
        Ok(pareceres) => println!("  pareceres: {}", pareceres.len()),
        Err(e) => println!("  Error listing pareceres: {}", e),
    }

    match api.list_documentos(target).await {
        Ok(documentos) => {
            let sem_url = documentos.iter().filter(|d| !d.has_url()).count();
            println!("  documentos: {} ({} without url)", documentos.len(), sem_url);
        }
        Err(e) => println!("  Error listing documentos: {}", e),
    }

    if issues == 0 {
        println!("\n  All consistent!");
    }

    println!("\n=== Done ===");
}
