//! # Integration Tests
//!
//! 集成测试与端到端测试。
//!
//! 负责：
//! - 合约测试：任何 `OutputDispatcher` 实现都应满足的行为
//! - 配置文件 -> dispatcher -> 磁盘 的端到端流程

#[cfg(test)]
mod contract_tests {
    use std::io::Write;

    use contracts::{ContractError, OutputDispatcher, SheetNamePolicy};
    use dispatcher::{MemoryOutputDispatcher, PerSheetOutputDispatcher};
    use tempfile::tempdir;

    /// Open, write, close; returns the bytes the stream accepted.
    fn round_trip<D: OutputDispatcher>(dispatcher: &D, sheet: &str, content: &[u8]) -> u64 {
        let mut stream = dispatcher.open_stream_for_sheet(sheet).unwrap();
        assert_eq!(stream.sheet_name(), sheet);
        stream.write_all(content).unwrap();
        let n = stream.bytes_written();
        dispatcher.close_stream_for_sheet(stream).unwrap();
        n
    }

    fn assert_close_never_fails<D: OutputDispatcher>(dispatcher: &D) {
        for sheet in ["Revenue", "Costs", "Revenue"] {
            assert_eq!(round_trip(dispatcher, sheet, b"a,b\n"), 4);
        }
        let stream = dispatcher.open_stream_for_sheet("empty").unwrap();
        assert!(dispatcher.close_stream_for_sheet(stream).is_ok());
    }

    fn assert_strict_rejects<D: OutputDispatcher>(dispatcher: &D) {
        for sheet in ["../evil", "a/b", ""] {
            let err = dispatcher.open_stream_for_sheet(sheet).unwrap_err();
            assert!(
                matches!(err, ContractError::InvalidSheetName { .. }),
                "{sheet:?} should be rejected, got {err}"
            );
        }
    }

    #[test]
    fn test_per_sheet_contract() {
        let dir = tempdir().unwrap();
        let dispatcher = PerSheetOutputDispatcher::new(dir.path().join("out"));
        assert_close_never_fails(&dispatcher);
        assert_eq!(dispatcher.metrics().outstanding(), 0);
    }

    #[test]
    fn test_memory_contract() {
        let dispatcher = MemoryOutputDispatcher::default();
        assert_close_never_fails(&dispatcher);
        assert_eq!(dispatcher.metrics().outstanding(), 0);
    }

    #[test]
    fn test_strict_policy_on_both_dispatchers() {
        let dir = tempdir().unwrap();
        let config = contracts::DispatcherConfig::new(dir.path())
            .with_sheet_names(SheetNamePolicy::Strict);
        assert_strict_rejects(&PerSheetOutputDispatcher::from_config(config));
        assert_strict_rejects(
            &MemoryOutputDispatcher::default().with_sheet_names(SheetNamePolicy::Strict),
        );
    }

    #[test]
    fn test_file_and_memory_agree() {
        let dir = tempdir().unwrap();
        let files = PerSheetOutputDispatcher::new(dir.path());
        let memory = MemoryOutputDispatcher::default();

        let writes: [(&str, &[u8]); 3] = [
            ("Revenue", b"a,b\n"),
            ("Costs", b"c\n"),
            ("Revenue", b"z\n"),
        ];
        for (sheet, content) in writes {
            round_trip(&files, sheet, content);
            round_trip(&memory, sheet, content);
        }

        for sheet in ["Revenue", "Costs"] {
            let on_disk = std::fs::read(files.path_for_sheet(sheet)).unwrap();
            assert_eq!(Some(on_disk), memory.contents(sheet), "sheet {sheet}");
        }
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::fs;
    use std::io::Write;

    use config_loader::ConfigLoader;
    use contracts::{ContractError, OutputDispatcher};
    use dispatcher::PerSheetOutputDispatcher;
    use tempfile::tempdir;

    /// Config file -> dispatcher -> files on disk
    #[test]
    fn test_e2e_config_to_files() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("reports").join("2024");
        let config_path = dir.path().join("dispatch.toml");
        fs::write(
            &config_path,
            format!(
                "name = \"reports\"\nbase_path = {:?}\nsheet_names = \"strict\"\n",
                base.display().to_string()
            ),
        )
        .unwrap();

        let config = ConfigLoader::load_from_path(&config_path).unwrap();
        let dispatcher = PerSheetOutputDispatcher::from_config(config);
        assert_eq!(dispatcher.name(), "reports");

        let mut revenue = dispatcher.open_stream_for_sheet("Revenue").unwrap();
        let mut costs = dispatcher.open_stream_for_sheet("Costs").unwrap();
        revenue.write_all(b"month,amount\n").unwrap();
        costs.write_all(b"month,amount\n").unwrap();
        revenue.write_all(b"jan,10\n").unwrap();
        dispatcher.close_stream_for_sheet(revenue).unwrap();
        dispatcher.close_stream_for_sheet(costs).unwrap();

        assert_eq!(
            fs::read_to_string(base.join("Revenue.csv")).unwrap(),
            "month,amount\njan,10\n"
        );
        assert_eq!(
            fs::read_to_string(base.join("Costs.csv")).unwrap(),
            "month,amount\n"
        );

        let err = dispatcher.open_stream_for_sheet("../escape").unwrap_err();
        assert!(matches!(err, ContractError::InvalidSheetName { .. }));

        let snapshot = dispatcher.metrics();
        assert_eq!(snapshot.opened_count, 2);
        assert_eq!(snapshot.open_failure_count, 1);
        assert_eq!(snapshot.bytes_written, 33);
    }

    /// Files survive the dispatcher itself
    #[test]
    fn test_files_persist_after_dispatcher_dropped() {
        let dir = tempdir().unwrap();
        {
            let dispatcher = PerSheetOutputDispatcher::new(dir.path());
            let mut stream = dispatcher.open_stream_for_sheet("Revenue").unwrap();
            stream.write_all(b"a,b\n").unwrap();
            dispatcher.close_stream_for_sheet(stream).unwrap();
        }
        assert_eq!(fs::read(dir.path().join("Revenue.csv")).unwrap(), b"a,b\n");
    }
}
